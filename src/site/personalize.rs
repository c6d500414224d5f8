//! Personalized copy derived from [`UserBehavior`].
//!
//! Each field has its own ordered rule table; the first rule whose predicate
//! holds supplies the text. Tables are evaluated once per request.

use serde::Serialize;

use crate::site::behavior::{DeviceType, UserBehavior};

/// Five minutes on the site counts as engaged.
const ENGAGED_SECS: u64 = 300;
const FREQUENT_VISITS: u32 = 5;
const KEEN_GAME_ATTEMPTS: u32 = 3;

const DEFAULT_WELCOME: &str = "Welcome to the world of magic!";
const DEFAULT_ACTION: &str = "Watch the trailer";
const MOBILE_SUFFIX: &str = " Optimized for mobile devices.";

struct Rule {
    applies: fn(&UserBehavior) -> bool,
    text: fn(&UserBehavior) -> String,
}

fn frequent(b: &UserBehavior) -> bool {
    b.visit_count > FREQUENT_VISITS
}

fn returning(b: &UserBehavior) -> bool {
    b.visit_count > 1
}

fn engaged(b: &UserBehavior) -> bool {
    b.time_spent > ENGAGED_SECS
}

fn keen_player(b: &UserBehavior) -> bool {
    b.game_attempts > KEEN_GAME_ATTEMPTS
}

fn ticket_curious(b: &UserBehavior) -> bool {
    b.ticket_interest
}

const WELCOME_RULES: &[Rule] = &[
    Rule {
        applies: frequent,
        text: |_| "Welcome back, regular guest! We have a special offer for you.".to_string(),
    },
    Rule {
        applies: returning,
        text: |b| format!("Good to see you again! This is visit #{}.", b.visit_count),
    },
];

const ACTION_RULES: &[Rule] = &[
    Rule {
        applies: ticket_curious,
        text: |_| "Finish booking your tickets".to_string(),
    },
    Rule {
        applies: keen_player,
        text: |_| "Try your luck in the game again".to_string(),
    },
    Rule {
        applies: engaged,
        text: |_| "Book tickets now".to_string(),
    },
];

const OFFER_RULES: &[Rule] = &[
    Rule {
        applies: frequent,
        text: |_| "15% off for regular visitors of the site!".to_string(),
    },
    Rule {
        applies: engaged,
        text: |_| "A special price for keen viewers: 10% off!".to_string(),
    },
    Rule {
        applies: keen_player,
        text: |_| "Game activity bonus: one extra attempt!".to_string(),
    },
    Rule {
        applies: ticket_curious,
        text: |_| "Limited offer: tickets at a special price!".to_string(),
    },
];

fn first_match(rules: &[Rule], behavior: &UserBehavior) -> Option<String> {
    rules
        .iter()
        .find(|rule| (rule.applies)(behavior))
        .map(|rule| (rule.text)(behavior))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonalizedContent {
    pub welcome: String,
    pub action: String,
    pub offer: Option<String>,
}

pub fn personalize(behavior: &UserBehavior) -> PersonalizedContent {
    let mut welcome =
        first_match(WELCOME_RULES, behavior).unwrap_or_else(|| DEFAULT_WELCOME.to_string());
    if behavior.device_type == DeviceType::Mobile {
        welcome.push_str(MOBILE_SUFFIX);
    }
    PersonalizedContent {
        welcome,
        action: first_match(ACTION_RULES, behavior).unwrap_or_else(|| DEFAULT_ACTION.to_string()),
        offer: first_match(OFFER_RULES, behavior),
    }
}
