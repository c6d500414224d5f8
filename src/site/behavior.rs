//! Visitor behavior tracking, persisted under `secret-show-behavior`.
//!
//! The page reports raw signals (visit start, elapsed time, sections
//! scrolled into view, tagged clicks); this module folds them into one
//! record that the personalization rules read.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Mobile,
    #[default]
    Desktop,
}

impl DeviceType {
    pub fn classify(viewport_width: u32, breakpoint: u32) -> Self {
        if viewport_width < breakpoint {
            DeviceType::Mobile
        } else {
            DeviceType::Desktop
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserBehavior {
    pub visit_count: u32,
    /// RFC 3339 timestamp of the current visit.
    pub last_visit: String,
    /// Seconds, accumulated across visits.
    pub time_spent: u64,
    pub sections_visited: BTreeSet<String>,
    pub game_attempts: u32,
    pub ticket_interest: bool,
    pub preferred_show_time: String,
    pub device_type: DeviceType,
}

impl UserBehavior {
    /// Called once per page load, after the stored record (if any) is loaded.
    pub fn begin_visit(&mut self, now: String, viewport_width: u32, breakpoint: u32) {
        self.visit_count = self.visit_count.saturating_add(1);
        self.last_visit = now;
        self.device_type = DeviceType::classify(viewport_width, breakpoint);
    }

    pub fn add_time(&mut self, secs: u64) {
        self.time_spent = self.time_spent.saturating_add(secs);
    }

    /// Returns `true` the first time a section is seen.
    pub fn visit_section(&mut self, id: &str) -> bool {
        if id.is_empty() || self.sections_visited.contains(id) {
            return false;
        }
        self.sections_visited.insert(id.to_string())
    }

    pub fn mark_ticket_interest(&mut self) {
        self.ticket_interest = true;
    }

    pub fn record_game_attempt(&mut self) {
        self.game_attempts = self.game_attempts.saturating_add(1);
    }

    pub fn prefer_show_time(&mut self, time: &str) {
        if !time.is_empty() {
            self.preferred_show_time = time.to_string();
        }
    }
}
