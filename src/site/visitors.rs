//! Simulated visitor counter. The numbers are decorative; each tick nudges
//! the live figures the way a real audience would drift.

use rand::Rng;

const ONLINE_MIN: u32 = 15;
const ONLINE_MAX: u32 = 45;
/// Chance that a tick brings in one more visitor today.
const NEW_VISITOR_CHANCE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitorStats {
    pub total_visitors: u32,
    pub today_visitors: u32,
    pub online_now: u32,
    pub shows_this_month: u32,
}

impl Default for VisitorStats {
    fn default() -> Self {
        Self {
            total_visitors: 2847,
            today_visitors: 156,
            online_now: 23,
            shows_this_month: 12,
        }
    }
}

impl VisitorStats {
    pub fn tick<R: Rng>(&mut self, rng: &mut R) {
        let drifted = if rng.gen_bool(0.5) {
            self.online_now + 1
        } else {
            self.online_now.saturating_sub(1)
        };
        self.online_now = drifted.clamp(ONLINE_MIN, ONLINE_MAX);
        if rng.gen_bool(NEW_VISITOR_CHANCE) {
            self.today_visitors += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn online_stays_in_band() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let mut stats = VisitorStats::default();
        let start_today = stats.today_visitors;
        for _ in 0..2_000 {
            let before = stats.online_now;
            stats.tick(&mut rng);
            assert!((ONLINE_MIN..=ONLINE_MAX).contains(&stats.online_now));
            assert!(stats.online_now.abs_diff(before) <= 1);
        }
        assert!(stats.today_visitors >= start_today);
        assert_eq!(stats.total_visitors, 2847);
    }
}
