//! Outgoing analytics events.
//!
//! Events are queued in memory and drained by the page, which forwards them
//! to its tag managers. Nothing here waits on or checks delivery. A page
//! that never drains loses the oldest events once the queue is full.

use std::collections::VecDeque;

use serde::Serialize;

pub const TICKET_PURCHASE_CLICK: &str = "ticket_purchase_click";
pub const TICKET_PURCHASE: &str = "ticket_purchase";
pub const VIDEO_PLAY: &str = "video_play";
pub const TREASURE_GAME_PLAY: &str = "treasure_game_play";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsEvent {
    pub name: String,
    pub category: &'static str,
    pub label: String,
}

impl AnalyticsEvent {
    /// Build an engagement event. Known names get their usual label.
    pub fn engagement(name: &str) -> Self {
        let label = match name {
            TICKET_PURCHASE_CLICK => "hero_cta",
            TICKET_PURCHASE => "checkout",
            VIDEO_PLAY => "trailer",
            TREASURE_GAME_PLAY => "mini_game",
            _ => "page",
        };
        Self {
            name: name.to_string(),
            category: "engagement",
            label: label.to_string(),
        }
    }
}

pub const MAX_PENDING: usize = 100;

#[derive(Debug, Default)]
pub struct EventQueue {
    pending: VecDeque<AnalyticsEvent>,
}

impl EventQueue {
    pub fn track(&mut self, event: AnalyticsEvent) {
        if self.pending.len() >= MAX_PENDING {
            if let Some(dropped) = self.pending.pop_front() {
                tracing::debug!(event = %dropped.name, "analytics queue full, oldest event dropped");
            }
        }
        tracing::debug!(event = %event.name, "analytics event queued");
        self.pending.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn drain(&mut self) -> Vec<AnalyticsEvent> {
        self.pending.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_queue_in_order() {
        let mut q = EventQueue::default();
        q.track(AnalyticsEvent::engagement(VIDEO_PLAY));
        q.track(AnalyticsEvent::engagement(TREASURE_GAME_PLAY));
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].label, "trailer");
        assert_eq!(events[1].label, "mini_game");
        assert!(q.is_empty());
    }

    #[test]
    fn full_queue_drops_oldest() {
        let mut q = EventQueue::default();
        q.track(AnalyticsEvent::engagement("first"));
        for _ in 0..MAX_PENDING {
            q.track(AnalyticsEvent::engagement(VIDEO_PLAY));
        }
        assert_eq!(q.len(), MAX_PENDING);
        let events = q.drain();
        assert!(events.iter().all(|e| e.name == VIDEO_PLAY));
    }

    #[test]
    fn unknown_events_get_page_label() {
        let e = AnalyticsEvent::engagement("scroll_depth");
        assert_eq!(e.category, "engagement");
        assert_eq!(e.label, "page");
    }
}
