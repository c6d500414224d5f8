//! `/api/reviews` routes: review carousel and the review form.

use crate::config::SiteConfig;
use crate::routes::util::{delayed_post, error_fragment, escape_html, get_param, parse_form_body, parse_param};
use crate::site::reviews::{Carousel, REVIEWS, ReviewForm, ReviewSubmission};
use crate::site::session::{with_session, with_session_mut};

const TARGET: &str = "#reviews-carousel";

// ── GET /api/reviews ───────────────────────────────────────────────

/// Handle GET /api/reviews
pub fn handle_get(_query: &str) -> String {
    with_session(|s| render_carousel(&s.carousel, &s.config))
}

// ── POST /api/reviews ──────────────────────────────────────────────

/// Handle POST /api/reviews
/// Body params:
///   - action=next | prev           → manual step, pauses autoplay
///   - action=goto&index={n}        → jump to a dot, pauses autoplay
///   - action=tick                  → autoplay step (ignored while paused)
///   - action=resume                → restart autoplay after a pause
pub fn handle_post(body: &str) -> String {
    let params = parse_form_body(body);
    let action = get_param(&params, "action").unwrap_or("");

    with_session_mut(|s| {
        match action {
            "next" => s.carousel.next(),
            "prev" => s.carousel.prev(),
            "goto" => match parse_param::<usize>(&params, "index") {
                Some(index) => s.carousel.go_to(index),
                None => return error_fragment("Missing or invalid index parameter"),
            },
            "tick" => s.carousel.tick(),
            "resume" => s.carousel.resume(),
            _ => return error_fragment("Unknown reviews action"),
        }
        render_carousel(&s.carousel, &s.config)
    })
}

// ── POST /api/reviews/submit ───────────────────────────────────────

/// Handle POST /api/reviews/submit
/// Body params: name, age, city, text, rating (1-5, defaults to 5).
/// Accepted reviews are acknowledged; nothing is stored.
pub fn handle_submit_post(body: &str) -> String {
    let params = parse_form_body(body);
    let form = ReviewForm {
        name: get_param(&params, "name"),
        age: get_param(&params, "age"),
        city: get_param(&params, "city"),
        text: get_param(&params, "text"),
        rating: get_param(&params, "rating"),
    };
    match ReviewSubmission::validate(form) {
        Ok(review) => {
            tracing::info!(rating = review.rating, "review submitted");
            format!(
                r#"<div class="rounded-lg border border-green-500/40 bg-green-900/40 p-4 text-green-300" role="status">Thank you, {}! Your review has been sent for moderation.</div>"#,
                escape_html(&review.name)
            )
        }
        Err(e) => error_fragment(e),
    }
}

// ── Rendering ──────────────────────────────────────────────────────

fn stars(rating: u8) -> String {
    (1..=5)
        .map(|i| if i <= rating { "&#x2605;" } else { "&#x2606;" })
        .collect()
}

fn nav_button(vals: &str, label: &str, aria: &str) -> String {
    format!(
        r##"<button hx-post="/api/reviews" hx-vals='{vals}' hx-target="{TARGET}" hx-swap="innerHTML" aria-label="{aria}" class="rounded-full border border-yellow-500/40 px-3 py-1 hover:bg-yellow-500/10">{label}</button>"##
    )
}

pub fn render_carousel(carousel: &Carousel, config: &SiteConfig) -> String {
    let review = carousel.current();
    let mut html = String::with_capacity(2048);
    html.push_str(r#"<div class="rounded-xl border border-yellow-500/30 bg-gray-900 p-6 text-center">"#);
    html.push_str(&format!(
        r#"<img src="{}" alt="{}" class="mx-auto mb-3 h-16 w-16 rounded-full object-cover">"#,
        review.avatar, review.name
    ));
    html.push_str(&format!(
        r#"<p class="mb-2 text-yellow-400" aria-label="{} of 5">{}</p>"#,
        review.rating,
        stars(review.rating)
    ));
    html.push_str(&format!(r#"<p class="mb-4 italic">&ldquo;{}&rdquo;</p>"#, review.text));
    html.push_str(&format!(
        r#"<p class="font-bold">{}, {}</p><p class="text-sm text-gray-400">{}</p>"#,
        review.name, review.age, review.city
    ));

    html.push_str(r#"<div class="mt-4 flex items-center justify-center gap-2">"#);
    html.push_str(&nav_button(r#"{"action":"prev"}"#, "&#x2039;", "Previous review"));
    for i in 0..REVIEWS.len() {
        let class = if i == carousel.index() { "bg-yellow-400" } else { "bg-gray-600" };
        html.push_str(&format!(
            r##"<button hx-post="/api/reviews" hx-vals='{{"action":"goto","index":"{i}"}}' hx-target="{TARGET}" hx-swap="innerHTML" aria-label="Review {n}" class="h-2 w-2 rounded-full {class}"></button>"##,
            n = i + 1
        ));
    }
    html.push_str(&nav_button(r#"{"action":"next"}"#, "&#x203A;", "Next review"));
    html.push_str("</div></div>");

    // Autoplay keeps rescheduling itself; a manual step schedules the resume.
    if carousel.is_autoplaying() {
        html.push_str(&delayed_post("/api/reviews", r#"{"action":"tick"}"#, TARGET, config.carousel_interval_ms));
    } else {
        html.push_str(&delayed_post("/api/reviews", r#"{"action":"resume"}"#, TARGET, config.carousel_resume_ms));
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::session::{Session, replace_session};

    fn reset() {
        replace_session(Session::default());
    }

    #[test]
    fn get_shows_first_review_with_autoplay() {
        reset();
        let html = handle_get("");
        assert!(html.contains("Anna Petrova"));
        assert!(html.contains(r#""action":"tick""#));
        assert!(html.contains("load delay:4000ms"));
        reset();
    }

    #[test]
    fn manual_step_pauses_and_schedules_resume() {
        reset();
        let html = handle_post("action=prev");
        assert!(html.contains("Andrey Petrov"));
        assert!(html.contains(r#""action":"resume""#));
        assert!(html.contains("load delay:10000ms"));

        // Ticks are ignored while paused.
        let html = handle_post("action=tick");
        assert!(html.contains("Andrey Petrov"));

        let html = handle_post("action=resume");
        assert!(html.contains(r#""action":"tick""#));
        reset();
    }

    #[test]
    fn goto_jumps_to_dot() {
        reset();
        assert!(handle_post("action=goto&index=4").contains("Olga Morozova"));
        assert!(handle_post("action=goto&index=x").contains("Missing or invalid index"));
        reset();
    }

    #[test]
    fn submit_accepts_valid_review() {
        let html = handle_submit_post("name=Ivan+%3Cb%3E&age=30&city=Omsk&text=Wow&rating=4");
        assert!(html.contains("Thank you, Ivan &lt;b&gt;!"));
    }

    #[test]
    fn submit_requires_every_field() {
        let html = handle_submit_post("name=Ivan&age=30&text=Wow");
        assert!(html.contains("city is required"));
    }

    #[test]
    fn submit_rejects_bad_rating() {
        let html = handle_submit_post("name=Ivan&age=30&city=Omsk&text=Wow&rating=9");
        assert!(html.contains("rating must be between 1 and 5"));
    }

    #[test]
    fn unknown_action() {
        assert!(handle_post("action=spin").contains("Unknown reviews action"));
    }
}
