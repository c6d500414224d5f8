//! Session container.
//!
//! Uses `thread_local!` + `RefCell` for safe mutable access in single-threaded
//! WASM. The Web Worker keeps the module alive, so the session persists across
//! `handle_request` calls until the tab is closed. Every component receives
//! its state and RNG here, at construction.

use std::cell::RefCell;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::info;

use crate::config::SiteConfig;
use crate::site::analytics::EventQueue;
use crate::site::behavior::UserBehavior;
use crate::site::booking::Booking;
use crate::site::chest::{ChestGame, ChestRules, ChestState};
use crate::site::persist::{self, Snapshot};
use crate::site::reviews::Carousel;
use crate::site::visitors::VisitorStats;

pub struct Session {
    pub config: SiteConfig,
    pub chest: ChestGame<ChaCha20Rng>,
    pub booking: Booking<ChaCha20Rng>,
    pub behavior: UserBehavior,
    pub carousel: Carousel,
    pub visitors: VisitorStats,
    pub visitor_rng: ChaCha20Rng,
    pub analytics: EventQueue,
}

/// Component RNG: derived from the configured seed, or from browser entropy.
fn component_rng(seed: Option<u64>, stream: u64) -> ChaCha20Rng {
    match seed {
        Some(seed) => {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            rng.set_stream(stream);
            rng
        }
        None => ChaCha20Rng::from_entropy(),
    }
}

impl Session {
    pub fn new(config: SiteConfig) -> Self {
        let rules = ChestRules {
            attempts_per_day: config.attempts_per_day,
            win_chance: config.win_chance,
        };
        let chest_state = ChestState {
            attempts_left: config.attempts_per_day,
            ..ChestState::default()
        };
        Self {
            chest: ChestGame::new(chest_state, rules, component_rng(config.seed, 1)),
            booking: Booking::new(component_rng(config.seed, 2)),
            behavior: UserBehavior::default(),
            carousel: Carousel::default(),
            visitors: VisitorStats::default(),
            visitor_rng: component_rng(config.seed, 3),
            analytics: EventQueue::default(),
            config,
        }
    }

    /// Load both storage entries. The chest gets its daily reset for `today`.
    pub fn restore(&mut self, snapshot: &Snapshot, today: &str) {
        let chest = persist::load_chest(
            snapshot.game.as_deref(),
            today,
            self.config.attempts_per_day,
        );
        self.chest.replace_state(chest);
        self.behavior = persist::load_behavior(snapshot.behavior.as_deref());
        info!(
            attempts_left = self.chest.state().attempts_left,
            visits = self.behavior.visit_count,
            "session restored"
        );
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            game: Some(persist::save_chest(self.chest.state())),
            behavior: Some(persist::save_behavior(&self.behavior)),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SiteConfig::default())
    }
}

thread_local! {
    static SESSION: RefCell<Session> = RefCell::new(Session::default());
}

/// Execute a closure with read access to the session.
pub fn with_session<F, R>(f: F) -> R
where
    F: FnOnce(&Session) -> R,
{
    SESSION.with(|s| f(&s.borrow()))
}

/// Execute a closure with mutable access to the session.
pub fn with_session_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut Session) -> R,
{
    SESSION.with(|s| f(&mut s.borrow_mut()))
}

/// Replace the whole session (configuration changes, tests).
pub fn replace_session(session: Session) {
    SESSION.with(|s| {
        *s.borrow_mut() = session;
    });
}
