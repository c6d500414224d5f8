//! `/api/behavior` routes: behavior signals in, personalized copy out.

use crate::clock;
use crate::routes::state::persist_behavior;
use crate::routes::util::{error_fragment, get_param, parse_form_body, parse_param};
use crate::site::personalize::personalize;
use crate::site::session::{with_session, with_session_mut};

// ── POST /api/behavior ─────────────────────────────────────────────

/// Handle POST /api/behavior
/// Body params:
///   - event=visit&width={px}       → page load; counts the visit, classifies the device
///   - event=elapsed&secs={n}       → time spent since the last report
///   - event=section&id={section}   → a section scrolled into view
///   - event=ticket                 → a ticket button was clicked
///   - event=show_time&time={hh:mm} → a show time was picked
///
/// Answers with the persist script for the updated record.
pub fn handle_post(body: &str) -> String {
    let params = parse_form_body(body);
    let event = get_param(&params, "event").unwrap_or("");

    with_session_mut(|s| {
        match event {
            "visit" => {
                let Some(width) = parse_param::<u32>(&params, "width") else {
                    return error_fragment("Missing or invalid width parameter");
                };
                let breakpoint = s.config.mobile_breakpoint_px;
                s.behavior
                    .begin_visit(clock::timestamp(clock::now()), width, breakpoint);
                tracing::info!(
                    visits = s.behavior.visit_count,
                    device = ?s.behavior.device_type,
                    "visit started"
                );
            }
            "elapsed" => match parse_param::<u64>(&params, "secs") {
                Some(secs) => s.behavior.add_time(secs),
                None => return error_fragment("Missing or invalid secs parameter"),
            },
            "section" => {
                let id = get_param(&params, "id").unwrap_or("");
                if id.is_empty() {
                    return error_fragment("Missing id parameter");
                }
                // Repeat sightings change nothing, so there is nothing to persist.
                if !s.behavior.visit_section(id) {
                    return String::new();
                }
            }
            "ticket" => s.behavior.mark_ticket_interest(),
            "show_time" => {
                let time = get_param(&params, "time").unwrap_or("");
                if time.is_empty() {
                    return error_fragment("Missing time parameter");
                }
                s.behavior.prefer_show_time(time);
            }
            _ => return error_fragment("Unknown behavior event"),
        }
        persist_behavior(s)
    })
}

// ── GET /api/behavior/content ──────────────────────────────────────

/// Handle GET /api/behavior/content
/// Returns the personalized welcome, action and offer as JSON.
pub fn handle_content_get(_query: &str) -> String {
    with_session(|s| {
        serde_json::to_string(&personalize(&s.behavior))
            .unwrap_or_else(|e| format!(r#"{{"error":"{e}"}}"#))
    })
}
