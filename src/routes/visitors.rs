//! `/api/visitors` routes: the live visitor counter.

use crate::site::session::{with_session, with_session_mut};
use crate::site::visitors::VisitorStats;

/// Seconds between counter refreshes.
const REFRESH_SECS: u32 = 5;

/// Handle GET /api/visitors
pub fn handle_get(_query: &str) -> String {
    with_session(|s| render_counter(&s.visitors))
}

/// Handle POST /api/visitors
/// Advances the simulated counter one step.
pub fn handle_post(_body: &str) -> String {
    with_session_mut(|s| {
        s.visitors.tick(&mut s.visitor_rng);
        render_counter(&s.visitors)
    })
}

fn render_counter(stats: &VisitorStats) -> String {
    let mut html = format!(
        r##"<div hx-post="/api/visitors" hx-trigger="every {REFRESH_SECS}s" hx-target="#visitor-counter" hx-swap="innerHTML" class="grid grid-cols-2 gap-4 text-center md:grid-cols-4">"##
    );
    for (value, label) in [
        (stats.total_visitors, "Total visitors"),
        (stats.today_visitors, "Today"),
        (stats.online_now, "Online now"),
        (stats.shows_this_month, "Shows this month"),
    ] {
        html.push_str(&format!(
            r#"<div><p class="text-2xl font-bold text-yellow-400">{value}</p><p class="text-xs text-gray-400">{label}</p></div>"#
        ));
    }
    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::site::session::{Session, replace_session};

    #[test]
    fn get_shows_starting_figures() {
        replace_session(Session::default());
        let html = handle_get("");
        assert!(html.contains(">2847<"));
        assert!(html.contains(">23<"));
        assert!(html.contains("every 5s"));
    }

    #[test]
    fn tick_moves_online_by_at_most_one() {
        replace_session(Session::new(SiteConfig {
            seed: Some(9),
            ..SiteConfig::default()
        }));
        handle_post("");
        let online = with_session(|s| s.visitors.online_now);
        assert!((22..=24).contains(&online));
        replace_session(Session::default());
    }
}
