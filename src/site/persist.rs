//! Local-storage round trips.
//!
//! The Web Worker cannot reach `localStorage`, so the page owns the storage
//! and hands raw entries in; these functions turn them into state (and back)
//! without touching anything global. Unreadable entries fall back to
//! defaults.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::site::behavior::UserBehavior;
use crate::site::chest::ChestState;

pub const GAME_STATE_KEY: &str = "treasureGameState";
pub const BEHAVIOR_KEY: &str = "secret-show-behavior";

fn decode_or_default<T: DeserializeOwned + Default>(key: &str, raw: Option<&str>) -> T {
    match raw.map(str::trim) {
        None | Some("") | Some("null") => T::default(),
        Some(json) => serde_json::from_str(json).unwrap_or_else(|e| {
            warn!(key, error = %e, "discarding unreadable stored state");
            T::default()
        }),
    }
}

/// Load the game state and apply the daily reset for `today`.
pub fn load_chest(raw: Option<&str>, today: &str, attempts_per_day: u8) -> ChestState {
    let mut state: ChestState = decode_or_default(GAME_STATE_KEY, raw);
    state.roll_over(today, attempts_per_day);
    state
}

pub fn save_chest(state: &ChestState) -> String {
    serde_json::to_string(state).unwrap_or_else(|_| "{}".to_string())
}

/// Load the stored behavior record. The visit itself is begun separately.
pub fn load_behavior(raw: Option<&str>) -> UserBehavior {
    decode_or_default(BEHAVIOR_KEY, raw)
}

pub fn save_behavior(behavior: &UserBehavior) -> String {
    serde_json::to_string(behavior).unwrap_or_else(|_| "{}".to_string())
}

/// Both storage entries, as the page reads and writes them. Values are the
/// raw strings kept under each key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "treasureGameState", default)]
    pub game: Option<String>,
    #[serde(rename = "secret-show-behavior", default)]
    pub behavior: Option<String>,
}

impl Snapshot {
    pub fn parse(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::chest::GamePhase;

    const TODAY: &str = "2026-10-18";

    #[test]
    fn missing_entry_yields_fresh_state() {
        let state = load_chest(None, TODAY, 3);
        assert_eq!(state.attempts_left, 3);
        assert_eq!(state.game_phase, GamePhase::Closed);
        assert_eq!(state.last_play_date.as_deref(), Some(TODAY));
    }

    #[test]
    fn stale_date_resets_attempts() {
        let raw = r#"{"attemptsLeft":0,"lastPlayDate":"2026-10-17","gamePhase":"result"}"#;
        let state = load_chest(Some(raw), TODAY, 3);
        assert_eq!(state.attempts_left, 3);
        assert_eq!(state.game_phase, GamePhase::Result);
    }

    #[test]
    fn same_day_keeps_attempts() {
        let raw = r#"{"attemptsLeft":1,"lastPlayDate":"2026-10-18"}"#;
        assert_eq!(load_chest(Some(raw), TODAY, 3).attempts_left, 1);
    }

    #[test]
    fn corrupt_entry_falls_back() {
        let state = load_chest(Some("{not json"), TODAY, 3);
        assert_eq!(state.attempts_left, 3);
        let behavior = load_behavior(Some("[1,2"));
        assert_eq!(behavior, UserBehavior::default());
    }

    #[test]
    fn chest_survives_save_and_load() {
        let mut state = load_chest(None, TODAY, 3);
        state.attempts_left = 2;
        state.selected_key = Some(3);
        let saved = save_chest(&state);
        assert_eq!(load_chest(Some(&saved), TODAY, 3), state);
    }

    #[test]
    fn snapshot_uses_storage_keys() {
        let snap = Snapshot {
            game: Some("{}".to_string()),
            behavior: None,
        };
        let json = snap.to_json();
        assert!(json.contains(r#""treasureGameState":"{}""#));
        assert_eq!(Snapshot::parse(&json).unwrap(), snap);
        assert_eq!(Snapshot::parse("{}").unwrap(), Snapshot::default());
    }
}
