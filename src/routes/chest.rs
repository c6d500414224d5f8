//! `/api/chest` routes: the treasure chest reward game.
//!
//! The widget lives in `#treasure-chest`. Every POST answers with the
//! re-rendered widget plus a script persisting the new game state.

use crate::clock;
use crate::config::SiteConfig;
use crate::error::Result;
use crate::routes::state::{persist_behavior, persist_chest};
use crate::routes::util::{delayed_post, error_fragment, get_param, parse_form_body, parse_param};
use crate::site::analytics::{AnalyticsEvent, TREASURE_GAME_PLAY};
use crate::site::chest::{ChestState, GamePhase, KEYS, find_key};
use crate::site::session::{Session, with_session, with_session_mut};

const TARGET: &str = "#treasure-chest";

// ── GET /api/chest ─────────────────────────────────────────────────

/// Handle GET /api/chest
/// Renders the trigger card when closed, otherwise the game modal.
pub fn handle_get(_query: &str) -> String {
    with_session(|s| render_chest(s.chest.state(), &s.config))
}

// ── POST /api/chest ────────────────────────────────────────────────

/// Handle POST /api/chest
/// Body params:
///   - action=open              → open the game (needs attempts left)
///   - action=select&key={1-4}  → choose a key
///   - action=attempt           → start opening the chest
///   - action=resolve           → draw the result (posted after the suspense delay)
///   - action=retry             → play again while attempts remain
///   - action=close             → close the modal (an opening chest is drawn first)
pub fn handle_post(body: &str) -> String {
    let params = parse_form_body(body);
    let action = get_param(&params, "action").unwrap_or("");

    let today = clock::day_marker(clock::today());

    with_session_mut(|s| {
        // A tab left open past midnight still gets the new day's attempts.
        // The reset stands even if `open` is then rejected.
        let rolled_over = action == "open" && s.chest.roll_over(&today);

        let outcome = match action {
            "open" => s.chest.open(),
            "select" => match parse_param::<u8>(&params, "key") {
                Some(key) => s.chest.select_key(key),
                None => return error_fragment("Missing or invalid key parameter"),
            },
            "attempt" => attempt(s),
            "resolve" => s.chest.resolve(&today).map(|_| ()),
            "retry" => s.chest.retry(),
            "close" => {
                s.chest.close(&today);
                Ok(())
            }
            _ => return error_fragment("Unknown chest action"),
        };

        let widget = render_chest(s.chest.state(), &s.config);
        match outcome {
            Ok(()) if action == "attempt" => {
                format!("{}{}{}", widget, persist_chest(s), persist_behavior(s))
            }
            Ok(()) => format!("{}{}", widget, persist_chest(s)),
            Err(e) if rolled_over => {
                format!("{}{}{}", error_fragment(e), widget, persist_chest(s))
            }
            Err(e) => format!("{}{}", error_fragment(e), widget),
        }
    })
}

/// Starting an attempt is the one place a play is counted, for analytics
/// and for personalization alike.
fn attempt(s: &mut Session) -> Result<()> {
    s.chest.attempt()?;
    s.analytics.track(AnalyticsEvent::engagement(TREASURE_GAME_PLAY));
    s.behavior.record_game_attempt();
    Ok(())
}

// ── Rendering ──────────────────────────────────────────────────────

fn action_button(action: &str, label: &str, classes: &str, enabled: bool) -> String {
    let disabled = if enabled { "" } else { " disabled" };
    format!(
        r##"<button hx-post="/api/chest" hx-vals='{{"action":"{action}"}}' hx-target="{TARGET}" hx-swap="innerHTML" class="{classes}"{disabled}>{label}</button>"##
    )
}

pub fn render_chest(state: &ChestState, config: &SiteConfig) -> String {
    if !state.is_open() {
        return render_trigger(state);
    }

    let mut html = String::with_capacity(2048);
    html.push_str(r#"<div class="fixed inset-0 z-50 flex items-center justify-center bg-black/80">"#);
    html.push_str(r#"<div class="relative w-full max-w-md rounded-xl border border-yellow-500/40 bg-gray-950 p-6 text-center text-yellow-100">"#);
    html.push_str(&action_button(
        "close",
        "&#x2715;",
        "absolute right-3 top-3 text-yellow-300 hover:text-white",
        true,
    ));
    html.push_str(r#"<p class="mb-1 text-2xl font-bold">Treasure Chest</p>"#);
    html.push_str(&format!(
        r#"<p class="mb-4 text-sm text-yellow-300">Attempts left: <strong>{}</strong></p>"#,
        state.attempts_left
    ));

    match state.game_phase {
        GamePhase::Selecting => render_selecting(&mut html, state),
        GamePhase::Opening => {
            html.push_str(r#"<p class="animate-bounce text-5xl">&#x1F9F0;</p>"#);
            html.push_str(r#"<p class="mt-4 text-lg">The chest is opening&hellip;</p>"#);
            html.push_str(&delayed_post(
                "/api/chest",
                r#"{"action":"resolve"}"#,
                TARGET,
                config.suspense_delay_ms,
            ));
        }
        GamePhase::Result => render_result(&mut html, state),
        GamePhase::Closed => {}
    }

    html.push_str("</div></div>");
    html
}

fn render_trigger(state: &ChestState) -> String {
    let playable = state.attempts_left > 0;
    let mut html = String::with_capacity(768);
    html.push_str(r#"<div class="rounded-xl border border-yellow-500/30 bg-gray-950 p-6 text-center text-yellow-100">"#);
    html.push_str(r#"<p class="text-5xl">&#x1F381;</p>"#);
    html.push_str(r#"<p class="mt-2 text-xl font-bold">Treasure Chest</p>"#);
    html.push_str(r#"<p class="mb-4 text-sm">Pick a key, open the chest, win a prize.</p>"#);
    if playable {
        html.push_str(&format!(
            r##"<button hx-post="/api/chest" hx-vals='{{"action":"open"}}' hx-target="{TARGET}" hx-swap="innerHTML" class="rounded bg-yellow-500 px-4 py-2 font-bold text-black hover:bg-yellow-400">Play ({} left)</button>"##,
            state.attempts_left
        ));
    } else {
        html.push_str(r#"<button class="cursor-not-allowed rounded bg-gray-700 px-4 py-2 font-bold text-gray-400 opacity-50" disabled>No attempts left</button>"#);
        html.push_str(r#"<p class="mt-2 text-xs text-gray-400">New attempts arrive tomorrow.</p>"#);
    }
    html.push_str("</div>");
    html
}

fn render_selecting(html: &mut String, state: &ChestState) {
    html.push_str(r#"<p class="mb-4 text-5xl">&#x1F9F0;</p>"#);
    html.push_str(r#"<p class="mb-2 text-sm">Choose your key:</p>"#);
    html.push_str(r#"<div class="mb-4 grid grid-cols-2 gap-2">"#);
    for key in &KEYS {
        let selected = state.selected_key == Some(key.id);
        let ring = if selected {
            "border-yellow-400 bg-yellow-600"
        } else {
            "border-yellow-500/30 hover:bg-yellow-500/10"
        };
        html.push_str(&format!(
            r##"<button hx-post="/api/chest" hx-vals='{{"action":"select","key":"{}"}}' hx-target="{TARGET}" hx-swap="innerHTML" aria-pressed="{}" class="rounded border px-3 py-2 text-sm {}"><span class="{}">&#x1F511;</span> {}</button>"##,
            key.id, selected, ring, key.tint, key.name
        ));
    }
    html.push_str("</div>");
    html.push_str(&action_button(
        "attempt",
        "Open the chest",
        "w-full rounded bg-red-800 px-4 py-2 font-bold hover:bg-red-700 disabled:opacity-50",
        state.selected_key.is_some(),
    ));
}

fn render_result(html: &mut String, state: &ChestState) {
    match state.prize.filter(|_| state.has_won) {
        Some(prize) => {
            // The page fires its confetti burst when this marker appears.
            html.push_str(r#"<div data-confetti="win"></div>"#);
            html.push_str(r#"<p class="text-5xl">&#x1F3C6;</p>"#);
            html.push_str(r#"<p class="mt-2 text-xl font-bold text-yellow-300">You won!</p>"#);
            html.push_str(&format!(
                r#"<p class="mb-4 text-lg" data-prize="{}">{}</p>"#,
                prize.slug(),
                prize.text()
            ));
        }
        None => {
            html.push_str(r#"<p class="text-5xl">&#x1F512;</p>"#);
            html.push_str(r#"<p class="mb-4 mt-2 text-lg">Not this time. The chest stays locked.</p>"#);
        }
    }
    if let Some(key) = state.selected_key.and_then(find_key) {
        html.push_str(&format!(
            r#"<p class="mb-4 text-xs text-gray-400">Key used: {}</p>"#,
            key.name
        ));
    }
    if state.attempts_left > 0 {
        html.push_str(&action_button(
            "retry",
            "Try again",
            "w-full rounded bg-yellow-500 px-4 py-2 font-bold text-black hover:bg-yellow-400",
            true,
        ));
    } else {
        html.push_str(r#"<p class="text-sm text-gray-400">That was your last attempt today. Come back tomorrow!</p>"#);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::session::{Session, replace_session};

    fn reset() {
        replace_session(Session::new(SiteConfig {
            seed: Some(17),
            ..SiteConfig::default()
        }));
    }

    #[test]
    fn get_renders_trigger_when_closed() {
        reset();
        let html = handle_get("");
        assert!(html.contains("Play (3 left)"));
        // Plays are counted by `attempt`, so the trigger carries no click tag.
        assert!(!html.contains("data-track"));
        reset();
    }

    #[test]
    fn open_select_attempt_flow() {
        reset();
        let html = handle_post("action=open");
        assert!(html.contains("Choose your key"));
        assert!(html.contains("localStorage.setItem"));

        let html = handle_post("action=select&key=1");
        assert!(html.contains(r#"aria-pressed="true""#));

        let html = handle_post("action=attempt");
        assert!(html.contains("The chest is opening"));
        assert!(html.contains("load delay:2000ms"));
        assert!(html.contains("secret-show-behavior"));
        assert_eq!(with_session(|s| s.analytics.len()), 1);
        assert_eq!(with_session(|s| s.behavior.game_attempts), 1);

        let html = handle_post("action=resolve");
        assert!(html.contains("You won!") || html.contains("Not this time"));
        assert_eq!(with_session(|s| s.chest.state().attempts_left), 2);
        reset();
    }

    #[test]
    fn attempt_without_key_is_rejected() {
        reset();
        handle_post("action=open");
        let html = handle_post("action=attempt");
        assert!(html.contains("Pick a key first"));
        assert_eq!(with_session(|s| s.chest.state().game_phase), GamePhase::Selecting);
        reset();
    }

    #[test]
    fn select_with_bad_key_param() {
        reset();
        handle_post("action=open");
        assert!(handle_post("action=select&key=gold").contains("Missing or invalid key"));
        assert!(handle_post("action=select&key=8").contains("Unknown key: 8"));
        reset();
    }

    #[test]
    fn exhausted_trigger_is_disabled() {
        reset();
        handle_post("action=open");
        for _ in 0..3 {
            handle_post("action=select&key=4");
            handle_post("action=attempt");
            handle_post("action=resolve");
            handle_post("action=retry");
        }
        let html = handle_post("action=close");
        assert!(html.contains("No attempts left"));
        assert!(handle_post("action=open").contains("No attempts left today"));
        reset();
    }

    #[test]
    fn one_round_counts_one_play() {
        reset();
        handle_post("action=open");
        handle_post("action=select&key=2");
        handle_post("action=attempt");
        handle_post("action=resolve");
        handle_post("action=close");
        with_session(|s| {
            assert_eq!(s.behavior.game_attempts, 1);
            assert_eq!(s.analytics.len(), 1);
        });
        reset();
    }

    #[test]
    fn closing_while_opening_still_spends_attempts() {
        reset();
        for _ in 0..10 {
            handle_post("action=open");
            handle_post("action=select&key=1");
            handle_post("action=attempt");
            let html = handle_post("action=close");
            assert!(html.contains("localStorage.setItem"));
        }
        with_session(|s| {
            assert_eq!(s.chest.state().attempts_left, 0);
            assert_eq!(s.chest.state().game_phase, GamePhase::Closed);
            assert_eq!(s.behavior.game_attempts, 3);
        });
        let json = crate::routes::state::handle_persist_get("");
        assert!(json.contains(r#"\"attemptsLeft\":0"#));
        reset();
    }

    #[test]
    fn rejected_open_still_persists_new_day() {
        reset();
        with_session_mut(|s| {
            s.chest.replace_state(ChestState {
                game_phase: GamePhase::Result,
                attempts_left: 0,
                last_play_date: Some("2001-01-01".to_string()),
                ..ChestState::default()
            })
        });
        let html = handle_post("action=open");
        assert!(html.contains("Action not available while the game is result"));
        assert!(html.contains("localStorage.setItem"));
        assert!(html.contains(r#"\"attemptsLeft\":3"#));
        reset();
    }

    #[test]
    fn rejected_action_without_reset_writes_nothing() {
        reset();
        let html = handle_post("action=retry");
        assert!(html.contains("Action not available while the game is closed"));
        assert!(!html.contains("localStorage"));
        reset();
    }

    #[test]
    fn unknown_action() {
        assert!(handle_post("action=shake").contains("Unknown chest action"));
    }
}
