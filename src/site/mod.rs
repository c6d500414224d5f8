//! Site state: everything the landing page remembers, held in WASM memory
//! for the lifetime of the Web Worker and persisted by the page.

pub mod analytics;
pub mod behavior;
pub mod booking;
pub mod chest;
pub mod personalize;
pub mod persist;
pub mod reviews;
pub mod schedule;
pub mod session;
pub mod visitors;
