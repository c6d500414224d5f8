//! `/api/state/*` routes: hand persisted state to the page and take it back.
//!
//! Mutating routes also append a `<script>` that writes the changed entry
//! straight to `localStorage`, so every change is persisted as it happens.

use crate::clock;
use crate::routes::util::{error_fragment, js_string};
use crate::site::persist::{self, BEHAVIOR_KEY, GAME_STATE_KEY, Snapshot};
use crate::site::session::{Session, with_session, with_session_mut};

fn set_item_script(key: &str, json: &str) -> String {
    format!(
        "<script>localStorage.setItem({}, {});</script>",
        js_string(key),
        js_string(json)
    )
}

/// Script persisting the reward game entry.
pub fn persist_chest(session: &Session) -> String {
    set_item_script(GAME_STATE_KEY, &persist::save_chest(session.chest.state()))
}

/// Script persisting the behavior entry.
pub fn persist_behavior(session: &Session) -> String {
    set_item_script(BEHAVIOR_KEY, &persist::save_behavior(&session.behavior))
}

// ── GET /api/state/persist ─────────────────────────────────────────

/// Handle GET /api/state/persist
/// Returns both storage entries as JSON, keyed by their localStorage names.
pub fn handle_persist_get(_query: &str) -> String {
    with_session(|s| s.snapshot().to_json())
}

// ── POST /api/state/restore ────────────────────────────────────────

/// Handle POST /api/state/restore
/// Body is the snapshot JSON the page assembled from localStorage on load.
/// Missing or unreadable entries restore as defaults; a body that is not a
/// snapshot at all is rejected and the session is left alone.
pub fn handle_restore_post(body: &str) -> String {
    let snapshot = if body.trim().is_empty() {
        Snapshot::default()
    } else {
        match Snapshot::parse(body) {
            Ok(snapshot) => snapshot,
            Err(e) => return error_fragment(e),
        }
    };
    let today = clock::day_marker(clock::today());
    with_session_mut(|s| {
        s.restore(&snapshot, &today);
        // The daily reset may have changed the game entry.
        persist_chest(s)
    })
}
