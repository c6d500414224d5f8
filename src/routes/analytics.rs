//! `/api/analytics` routes: queue events and hand them to the page.

use crate::routes::util::{error_fragment, get_param, parse_form_body};
use crate::site::analytics::AnalyticsEvent;
use crate::site::session::with_session_mut;

/// Handle POST /api/analytics
/// Body params: event={name}
pub fn handle_post(body: &str) -> String {
    let params = parse_form_body(body);
    match get_param(&params, "event").map(str::trim) {
        Some(name) if !name.is_empty() => {
            with_session_mut(|s| s.analytics.track(AnalyticsEvent::engagement(name)));
            String::new()
        }
        _ => error_fragment("Missing event parameter"),
    }
}

/// Handle GET /api/analytics/drain
/// Returns queued events as a JSON array and empties the queue.
pub fn handle_drain_get(_query: &str) -> String {
    let events = with_session_mut(|s| s.analytics.drain());
    serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
}
