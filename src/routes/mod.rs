pub mod analytics;
pub mod behavior;
pub mod booking;
pub mod chest;
pub mod reviews;
pub mod schedule;
pub mod state;
pub mod util;
pub mod visitors;
