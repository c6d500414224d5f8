//! Crate-wide error type.
//!
//! Nothing here is surfaced to visitors as an actionable failure: route
//! handlers render every variant as a small red fragment and leave the
//! session untouched.

use thiserror::Error;

use crate::site::chest::GamePhase;

#[derive(Debug, Error)]
pub enum Error {
    #[error("No attempts left today")]
    NoAttemptsLeft,
    #[error("Pick a key first")]
    NoKeySelected,
    #[error("Unknown key: {0}")]
    UnknownKey(u8),
    #[error("Action not available while the game is {0}")]
    InvalidPhase(GamePhase),
    #[error("Unknown show: {0}")]
    UnknownShow(String),
    #[error("Unknown seat: {0}")]
    UnknownSeat(String),
    #[error("Your cart is empty")]
    EmptyCart,
    #[error("Action not available on this booking step")]
    InvalidStep,
    #[error("Invalid review: {0}")]
    InvalidReview(&'static str),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Invalid snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
