//! Site configuration.
//!
//! Every field has a default, so the page may send a partial JSON object
//! (or nothing at all) through `configure`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteConfig {
    /// Reward game attempts granted each calendar day.
    pub attempts_per_day: u8,
    /// Probability that an attempt wins a prize.
    pub win_chance: f64,
    /// Suspense pause between opening the chest and the result.
    pub suspense_delay_ms: u32,
    /// Simulated payment processing time.
    pub payment_delay_ms: u32,
    /// Viewports narrower than this are classed as mobile.
    pub mobile_breakpoint_px: u32,
    pub carousel_interval_ms: u32,
    /// Autoplay resumes this long after manual carousel navigation.
    pub carousel_resume_ms: u32,
    /// Fixed RNG seed. `None` seeds from browser entropy.
    pub seed: Option<u64>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            attempts_per_day: 3,
            win_chance: 0.3,
            suspense_delay_ms: 2000,
            payment_delay_ms: 2000,
            mobile_breakpoint_px: 768,
            carousel_interval_ms: 4000,
            carousel_resume_ms: 10_000,
            seed: None,
        }
    }
}

impl SiteConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        if !(0.0..=1.0).contains(&config.win_chance) {
            return Err(Error::Config(format!(
                "winChance must be between 0 and 1, got {}",
                config.win_chance
            )));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = SiteConfig::from_json(r#"{"winChance":0.5,"seed":7}"#).unwrap();
        assert_eq!(cfg.win_chance, 0.5);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.attempts_per_day, 3);
        assert_eq!(cfg.mobile_breakpoint_px, 768);
    }

    #[test]
    fn empty_input_is_default() {
        assert_eq!(SiteConfig::from_json("  ").unwrap(), SiteConfig::default());
    }

    #[test]
    fn invalid_json_is_rejected() {
        assert!(SiteConfig::from_json("{attempts").is_err());
    }

    #[test]
    fn win_chance_out_of_range_is_rejected() {
        let err = SiteConfig::from_json(r#"{"winChance":1.5}"#).unwrap_err();
        assert!(err.to_string().contains("winChance must be between 0 and 1"));
    }
}
