//! Secret Show in-browser WASM server.
//!
//! Exports `handle_request(method, path, query, body)` for the Web Worker
//! bridge to call, plus `configure(json)` for site settings. Uses `matchit`
//! for URL routing. Every route answers with an HTML fragment for HTMX to
//! swap, except the state and analytics routes, which answer with JSON.
//!
//! The page owns `localStorage`. On load it posts a snapshot of the stored
//! entries to `/api/state/restore`; from then on mutating routes append a
//! script that writes their changed entry back.

use wasm_bindgen::prelude::*;

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod routes;
pub mod site;

use config::SiteConfig;
use site::session::{Session, replace_session};

#[wasm_bindgen(start)]
pub fn start() {
    logging::init();
    tracing::info!("secret show server ready");
}

/// Apply site settings (camelCase JSON, every field optional).
///
/// Rebuilds the session with the new settings, so call it before restoring
/// state. Returns `"ok"`, or an error message and keeps the old settings.
#[wasm_bindgen]
pub fn configure(json: &str) -> String {
    match SiteConfig::from_json(json) {
        Ok(config) => {
            tracing::info!(?config, "site configured");
            replace_session(Session::new(config));
            "ok".to_string()
        }
        Err(e) => {
            tracing::warn!(error = %e, "configuration rejected");
            e.to_string()
        }
    }
}

/// Process an HTTP-like request and return a response body.
///
/// Called from JavaScript (Web Worker) via wasm-bindgen.
///
/// # Arguments
/// * `method`: HTTP method (e.g., "GET", "POST")
/// * `path`  : URL path (e.g., "/api/chest")
/// * `query` : Query string (e.g., "?id=3")
/// * `body`  : Request body (form data or JSON). Empty string for GET requests.
#[wasm_bindgen]
pub fn handle_request(method: &str, path: &str, query: &str, body: &str) -> String {
    let mut router = matchit::Router::new();

    router.insert("/api/chest", "chest").ok();
    router.insert("/api/booking", "booking").ok();
    router.insert("/api/reviews", "reviews").ok();
    router.insert("/api/reviews/submit", "reviews_submit").ok();
    router.insert("/api/schedule", "schedule").ok();
    router.insert("/api/visitors", "visitors").ok();

    // Behavior tracking and personalization
    router.insert("/api/behavior", "behavior").ok();
    router.insert("/api/behavior/content", "behavior_content").ok();
    router.insert("/api/analytics", "analytics").ok();
    router.insert("/api/analytics/drain", "analytics_drain").ok();

    // localStorage bridge
    router.insert("/api/state/persist", "state_persist").ok();
    router.insert("/api/state/restore", "state_restore").ok();

    tracing::debug!(method, path, "request");

    match router.at(path) {
        Ok(matched) => match (*matched.value, method) {
            ("chest", "GET") => routes::chest::handle_get(query),
            ("chest", "POST") => routes::chest::handle_post(body),
            ("booking", "GET") => routes::booking::handle_get(query),
            ("booking", "POST") => routes::booking::handle_post(body),
            ("reviews", "GET") => routes::reviews::handle_get(query),
            ("reviews", "POST") => routes::reviews::handle_post(body),
            ("reviews_submit", "POST") => routes::reviews::handle_submit_post(body),
            ("schedule", "GET") => routes::schedule::handle_get(query),
            ("visitors", "GET") => routes::visitors::handle_get(query),
            ("visitors", "POST") => routes::visitors::handle_post(body),

            ("behavior", "POST") => routes::behavior::handle_post(body),
            ("behavior_content", "GET") => routes::behavior::handle_content_get(query),
            ("analytics", "POST") => routes::analytics::handle_post(body),
            ("analytics_drain", "GET") => routes::analytics::handle_drain_get(query),

            ("state_persist", "GET") => routes::state::handle_persist_get(query),
            ("state_restore", "POST") => routes::state::handle_restore_post(body),

            _ => method_not_allowed(),
        },
        Err(_) => not_found(),
    }
}

fn not_found() -> String {
    r#"<span class="text-red-500">404 — route not found</span>"#.to_string()
}

fn method_not_allowed() -> String {
    r#"<span class="text-red-500">405 — method not allowed</span>"#.to_string()
}
