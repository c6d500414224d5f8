//! Treasure chest reward game.
//!
//! Visitors get a fixed number of attempts per calendar day. Each attempt
//! picks one of four keys, waits through a short suspense pause, and then
//! draws a win (and, on a win, a prize tier) from the game's own RNG.
//!
//! ```text
//! closed ──open──▶ selecting ──attempt──▶ opening ──resolve──▶ result
//!    ▲                 ▲                                          │
//!    │                 └──────────────retry (attempts left)───────┤
//!    └────────close (any phase; settles an opening first)─────────┘
//! ```

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

pub const DEFAULT_ATTEMPTS: u8 = 3;

/// Game phase as persisted in `gamePhase`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Selecting,
    Opening,
    Result,
    #[default]
    Closed,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GamePhase::Selecting => "selecting",
            GamePhase::Opening => "opening",
            GamePhase::Result => "result",
            GamePhase::Closed => "closed",
        };
        f.write_str(name)
    }
}

pub struct ChestKey {
    pub id: u8,
    pub name: &'static str,
    /// Tailwind text color for the key icon.
    pub tint: &'static str,
}

pub const KEYS: [ChestKey; 4] = [
    ChestKey { id: 1, name: "Golden key", tint: "text-yellow-400" },
    ChestKey { id: 2, name: "Silver key", tint: "text-gray-300" },
    ChestKey { id: 3, name: "Bronze key", tint: "text-amber-600" },
    ChestKey { id: 4, name: "Magic key", tint: "text-purple-400" },
];

pub fn find_key(id: u8) -> Option<&'static ChestKey> {
    KEYS.iter().find(|k| k.id == id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrizeTier {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// Cumulative upper bounds checked in order against a single roll.
/// Anything past the last band is common.
const PRIZE_BANDS: [(f64, PrizeTier); 3] = [
    (0.05, PrizeTier::Legendary),
    (0.15, PrizeTier::Epic),
    (0.40, PrizeTier::Rare),
];

impl PrizeTier {
    /// Map one uniform roll in `[0, 1)` to a tier.
    pub fn from_roll(roll: f64) -> Self {
        PRIZE_BANDS
            .iter()
            .find(|(bound, _)| roll < *bound)
            .map(|(_, tier)| *tier)
            .unwrap_or(PrizeTier::Common)
    }

    /// Lowercase tier name, as stored in `prize`.
    pub fn slug(self) -> &'static str {
        match self {
            PrizeTier::Common => "common",
            PrizeTier::Rare => "rare",
            PrizeTier::Epic => "epic",
            PrizeTier::Legendary => "legendary",
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            PrizeTier::Common => "20% off a ticket",
            PrizeTier::Rare => "Free ticket",
            PrizeTier::Epic => "VIP seat",
            PrizeTier::Legendary => "Meet the illusionist",
        }
    }
}

/// Persisted game state, stored under `treasureGameState`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChestState {
    pub selected_key: Option<u8>,
    pub game_phase: GamePhase,
    pub has_won: bool,
    pub prize: Option<PrizeTier>,
    pub attempts_left: u8,
    /// `YYYY-MM-DD` of the last resolved attempt (or of the last reset).
    pub last_play_date: Option<String>,
}

impl Default for ChestState {
    fn default() -> Self {
        Self {
            selected_key: None,
            game_phase: GamePhase::Closed,
            has_won: false,
            prize: None,
            attempts_left: DEFAULT_ATTEMPTS,
            last_play_date: None,
        }
    }
}

impl ChestState {
    /// Daily reset: a stored date other than `today` restores the full
    /// allowance and stamps today. Returns whether a reset happened.
    pub fn roll_over(&mut self, today: &str, attempts_per_day: u8) -> bool {
        if self.last_play_date.as_deref() == Some(today) {
            return false;
        }
        self.attempts_left = attempts_per_day;
        self.last_play_date = Some(today.to_string());
        true
    }

    pub fn is_open(&self) -> bool {
        self.game_phase != GamePhase::Closed
    }

    fn clear_round(&mut self) {
        self.selected_key = None;
        self.has_won = false;
        self.prize = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChestRules {
    pub attempts_per_day: u8,
    pub win_chance: f64,
}

impl Default for ChestRules {
    fn default() -> Self {
        Self {
            attempts_per_day: DEFAULT_ATTEMPTS,
            win_chance: 0.3,
        }
    }
}

/// Outcome of one resolved attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Draw {
    pub won: bool,
    pub prize: Option<PrizeTier>,
}

/// The game: persisted state plus the RNG that drives every draw.
pub struct ChestGame<R> {
    state: ChestState,
    rules: ChestRules,
    rng: R,
}

impl<R: Rng> ChestGame<R> {
    pub fn new(state: ChestState, rules: ChestRules, rng: R) -> Self {
        Self { state, rules, rng }
    }

    pub fn state(&self) -> &ChestState {
        &self.state
    }

    pub fn rules(&self) -> ChestRules {
        self.rules
    }

    /// Swap in a freshly loaded state, keeping rules and RNG.
    pub fn replace_state(&mut self, state: ChestState) {
        self.state = state;
    }

    pub fn roll_over(&mut self, today: &str) -> bool {
        self.state.roll_over(today, self.rules.attempts_per_day)
    }

    /// `closed → selecting`.
    pub fn open(&mut self) -> Result<()> {
        if self.state.game_phase != GamePhase::Closed {
            return Err(self.reject(Error::InvalidPhase(self.state.game_phase)));
        }
        if self.state.attempts_left == 0 {
            return Err(self.reject(Error::NoAttemptsLeft));
        }
        self.state.clear_round();
        self.state.game_phase = GamePhase::Selecting;
        Ok(())
    }

    /// Single-select: a second pick replaces the first.
    pub fn select_key(&mut self, key: u8) -> Result<()> {
        if self.state.game_phase != GamePhase::Selecting {
            return Err(self.reject(Error::InvalidPhase(self.state.game_phase)));
        }
        if find_key(key).is_none() {
            return Err(self.reject(Error::UnknownKey(key)));
        }
        self.state.selected_key = Some(key);
        Ok(())
    }

    /// `selecting → opening`. The draw happens later, in [`resolve`](Self::resolve).
    pub fn attempt(&mut self) -> Result<()> {
        if self.state.game_phase != GamePhase::Selecting {
            return Err(self.reject(Error::InvalidPhase(self.state.game_phase)));
        }
        if self.state.selected_key.is_none() {
            return Err(self.reject(Error::NoKeySelected));
        }
        if self.state.attempts_left == 0 {
            return Err(self.reject(Error::NoAttemptsLeft));
        }
        self.state.game_phase = GamePhase::Opening;
        Ok(())
    }

    /// `opening → result`: draw the outcome and spend one attempt.
    pub fn resolve(&mut self, today: &str) -> Result<Draw> {
        if self.state.game_phase != GamePhase::Opening {
            return Err(self.reject(Error::InvalidPhase(self.state.game_phase)));
        }
        let won = self.rng.gen_bool(self.rules.win_chance.clamp(0.0, 1.0));
        let prize = won.then(|| PrizeTier::from_roll(self.rng.r#gen::<f64>()));

        self.state.game_phase = GamePhase::Result;
        self.state.has_won = won;
        self.state.prize = prize;
        self.state.attempts_left = self.state.attempts_left.saturating_sub(1);
        self.state.last_play_date = Some(today.to_string());

        info!(
            won,
            prize = ?prize,
            attempts_left = self.state.attempts_left,
            "chest resolved"
        );
        Ok(Draw { won, prize })
    }

    /// `result → selecting`, only while attempts remain.
    pub fn retry(&mut self) -> Result<()> {
        if self.state.game_phase != GamePhase::Result {
            return Err(self.reject(Error::InvalidPhase(self.state.game_phase)));
        }
        if self.state.attempts_left == 0 {
            return Err(self.reject(Error::NoAttemptsLeft));
        }
        self.state.clear_round();
        self.state.game_phase = GamePhase::Selecting;
        Ok(())
    }

    /// Always allowed. An attempt already under way cannot be taken back:
    /// closing while `opening` draws it first. From any other phase the
    /// attempt count is untouched.
    pub fn close(&mut self, today: &str) -> Option<Draw> {
        let settled = if self.state.game_phase == GamePhase::Opening {
            self.resolve(today).ok()
        } else {
            None
        };
        self.state.game_phase = GamePhase::Closed;
        self.state.selected_key = None;
        settled
    }

    fn reject(&self, err: Error) -> Error {
        debug!(phase = %self.state.game_phase, error = %err, "chest action rejected");
        err
    }
}
