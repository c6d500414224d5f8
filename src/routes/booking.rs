//! `/api/booking` routes: date picker, seat map, cart and checkout.
//!
//! The whole flow renders into `#ticket-booking`.

use rand::Rng;

use crate::routes::state::persist_behavior;
use crate::routes::util::{delayed_post, error_fragment, escape_html, get_param, parse_form_body};
use crate::site::analytics::{AnalyticsEvent, TICKET_PURCHASE, TICKET_PURCHASE_CLICK};
use crate::site::booking::{Booking, BookingStep, Receipt, ROWS, SHOWS, Seat, SeatClass};
use crate::site::session::{with_session, with_session_mut};

const TARGET: &str = "#ticket-booking";

// ── GET /api/booking ───────────────────────────────────────────────

/// Handle GET /api/booking
/// Renders whichever step the visitor is on.
pub fn handle_get(_query: &str) -> String {
    with_session(|s| render_booking(&s.booking, s.config.payment_delay_ms))
}

// ── POST /api/booking ──────────────────────────────────────────────

/// Handle POST /api/booking
/// Body params:
///   - action=show&id={show}   → pick a date, generate its seat map
///   - action=seat&id={seat}   → toggle a seat in the cart
///   - action=back             → previous step
///   - action=checkout         → go to payment
///   - action=pay              → start the simulated payment
///   - action=complete         → finish it (posted after the payment delay)
pub fn handle_post(body: &str) -> String {
    let params = parse_form_body(body);
    let action = get_param(&params, "action").unwrap_or("");
    let id = get_param(&params, "id").unwrap_or("");

    with_session_mut(|s| {
        let outcome = match action {
            "show" if !id.is_empty() => s.booking.select_show(id).map(|show| {
                s.analytics.track(AnalyticsEvent::engagement(TICKET_PURCHASE_CLICK));
                s.behavior.mark_ticket_interest();
                s.behavior.prefer_show_time(show.time);
                None
            }),
            "seat" if !id.is_empty() => s.booking.toggle_seat(id).map(|_| None),
            "show" | "seat" => return error_fragment("Missing id parameter"),
            "back" => s.booking.back().map(|_| None),
            "checkout" => s.booking.checkout().map(|_| None),
            "pay" => s.booking.pay().map(|_| {
                s.analytics.track(AnalyticsEvent::engagement(TICKET_PURCHASE));
                None
            }),
            "complete" => s.booking.complete().map(Some),
            _ => return error_fragment("Unknown booking action"),
        };

        let delay = s.config.payment_delay_ms;
        match outcome {
            Ok(Some(receipt)) => render_confirmation(&receipt) + &render_booking(&s.booking, delay),
            Ok(None) if action == "show" => render_booking(&s.booking, delay) + &persist_behavior(s),
            Ok(None) => render_booking(&s.booking, delay),
            Err(e) => error_fragment(e) + &render_booking(&s.booking, delay),
        }
    })
}

// ── Rendering ──────────────────────────────────────────────────────

fn post_button(vals: &str, label: &str, classes: &str) -> String {
    format!(
        r##"<button hx-post="/api/booking" hx-vals='{vals}' hx-target="{TARGET}" hx-swap="innerHTML" class="{classes}">{label}</button>"##
    )
}

fn render_steps(current: BookingStep) -> String {
    let mut html = String::from(r#"<div class="mb-6 flex justify-center gap-4 text-sm">"#);
    for (step, label) in [
        (BookingStep::Shows, "1. Date"),
        (BookingStep::Seats, "2. Seats"),
        (BookingStep::Checkout, "3. Payment"),
    ] {
        let class = if step == current { "font-bold text-yellow-400" } else { "text-gray-500" };
        html.push_str(&format!(r#"<span class="{class}">{label}</span>"#));
    }
    html.push_str("</div>");
    html
}

pub fn render_booking<R: Rng>(booking: &Booking<R>, payment_delay_ms: u32) -> String {
    let mut html = render_steps(booking.step());
    match booking.step() {
        BookingStep::Shows => render_shows(&mut html),
        BookingStep::Seats => render_seats(&mut html, booking),
        BookingStep::Checkout => render_checkout(&mut html, booking, payment_delay_ms),
    }
    html
}

fn render_shows(html: &mut String) {
    html.push_str(r#"<div class="grid gap-4 md:grid-cols-2 lg:grid-cols-3">"#);
    for show in &SHOWS {
        let availability = show.availability();
        html.push_str(&format!(
            r##"<div data-show-time="{time}" hx-post="/api/booking" hx-vals='{{"action":"show","id":"{id}"}}' hx-target="{TARGET}" hx-swap="innerHTML" class="cursor-pointer rounded-lg border border-yellow-500/30 bg-gray-900 p-4 hover:border-yellow-400">"##,
            time = show.time,
            id = show.id
        ));
        html.push_str(&format!(
            r#"<p class="font-bold">{} at {}</p>"#,
            show.date, show.time
        ));
        html.push_str(&format!(
            r#"<p class="text-sm text-gray-400">{} of {} seats &middot; from {}₽</p>"#,
            show.available_seats, show.total_seats, show.price
        ));
        html.push_str(&format!(
            r#"<span class="mt-2 inline-block rounded px-2 py-0.5 text-xs" data-availability="{:?}">{}</span>"#,
            availability,
            availability.label()
        ));
        html.push_str("</div>");
    }
    html.push_str("</div>");
}

fn seat_button<R: Rng>(booking: &Booking<R>, seat: &Seat) -> String {
    let state_class = if !seat.available {
        "cursor-not-allowed border-gray-500 bg-gray-600"
    } else if booking.is_in_cart(&seat.id) {
        "border-yellow-400 bg-yellow-500 text-black"
    } else if seat.class == SeatClass::Vip {
        "border-red-400 bg-red-800 text-white hover:bg-red-700"
    } else {
        "border-green-400 bg-green-600 text-white hover:bg-green-500"
    };
    let disabled = if seat.available { "" } else { " disabled" };
    format!(
        r##"<button hx-post="/api/booking" hx-vals='{{"action":"seat","id":"{id}"}}' hx-target="{TARGET}" hx-swap="innerHTML" title="Row {row}, Seat {number} - {price}₽" class="h-7 w-7 rounded border text-xs {state_class}"{disabled}>{number}</button>"##,
        id = seat.id,
        row = seat.row,
        number = seat.number,
        price = seat.price,
    )
}

fn render_seats<R: Rng>(html: &mut String, booking: &Booking<R>) {
    if let Some(show) = booking.show() {
        html.push_str(&format!(
            r#"<p class="mb-2 text-lg font-bold">{} at {}</p>"#,
            show.date, show.time
        ));
    }
    html.push_str(&post_button(
        r#"{"action":"back"}"#,
        "Back to dates",
        "mb-4 rounded border border-yellow-500/40 px-3 py-1 text-sm",
    ));
    html.push_str(r#"<div class="mb-4 rounded bg-gray-700 py-1 text-center text-xs tracking-widest">STAGE</div>"#);

    for row in 1..=ROWS {
        html.push_str(r#"<div class="mb-1 flex items-center justify-center gap-1">"#);
        html.push_str(&format!(r#"<span class="w-6 text-xs text-gray-500">{row}</span>"#));
        for seat in booking.seats().iter().filter(|s| s.row == row) {
            html.push_str(&seat_button(booking, seat));
        }
        html.push_str("</div>");
    }

    if booking.cart().is_empty() {
        return;
    }
    html.push_str(r#"<div class="mt-6 rounded-lg border border-yellow-500/30 bg-gray-900 p-4">"#);
    html.push_str(r#"<p class="mb-2 font-bold">Your seats</p>"#);
    render_cart_lines(html, booking, true);
    html.push_str(&format!(
        r#"<p class="mt-2 font-bold">Total: <span data-total>{}</span>₽</p>"#,
        booking.total()
    ));
    html.push_str(&post_button(
        r#"{"action":"checkout"}"#,
        "Proceed to payment",
        "mt-3 w-full rounded bg-yellow-500 py-2 font-bold text-black",
    ));
    html.push_str("</div>");
}

fn render_cart_lines<R: Rng>(html: &mut String, booking: &Booking<R>, removable: bool) {
    html.push_str(r#"<ul class="space-y-1 text-sm">"#);
    for item in booking.cart() {
        html.push_str(&format!(
            r#"<li class="flex justify-between"><span>{}</span><span>{}₽"#,
            item.seat_info, item.price
        ));
        if removable {
            html.push_str(&post_button(
                &format!(r#"{{"action":"seat","id":"{}"}}"#, escape_html(&item.seat_id)),
                "&#x2715;",
                "ml-2 text-red-400",
            ));
        }
        html.push_str("</span></li>");
    }
    html.push_str("</ul>");
}

fn render_checkout<R: Rng>(html: &mut String, booking: &Booking<R>, payment_delay_ms: u32) {
    if !booking.is_processing() {
        html.push_str(&post_button(
            r#"{"action":"back"}"#,
            "Back to seats",
            "mb-4 rounded border border-yellow-500/40 px-3 py-1 text-sm",
        ));
    }
    html.push_str(r#"<div class="rounded-lg border border-yellow-500/30 bg-gray-900 p-4">"#);
    html.push_str(r#"<p class="mb-2 font-bold">Order summary</p>"#);
    if let Some(show) = booking.show() {
        html.push_str(&format!(
            r#"<p class="mb-2 text-sm text-gray-400">{} at {}</p>"#,
            show.date, show.time
        ));
    }
    render_cart_lines(html, booking, false);
    html.push_str(&format!(
        r#"<p class="mt-2 font-bold">Total: <span data-total>{}</span>₽</p>"#,
        booking.total()
    ));
    html.push_str("</div>");

    if booking.is_processing() {
        html.push_str(r#"<p class="mt-4 animate-pulse text-center">Processing payment&hellip;</p>"#);
        html.push_str(&delayed_post(
            "/api/booking",
            r#"{"action":"complete"}"#,
            TARGET,
            payment_delay_ms,
        ));
    } else {
        html.push_str(&post_button(
            r#"{"action":"pay"}"#,
            &format!("Pay {}₽", booking.total()),
            "mt-4 w-full rounded bg-red-800 py-3 font-bold hover:bg-red-700",
        ));
        html.push_str(r#"<p class="mt-2 text-xs text-gray-500">Tickets are emailed within 5 minutes of payment.</p>"#);
    }
}

fn render_confirmation(receipt: &Receipt) -> String {
    format!(
        r#"<div class="mb-4 rounded border border-green-500/40 bg-green-900/40 p-4 text-green-300" role="status">Order placed! {} seat(s), total paid: {}₽. Your tickets will arrive by email within 5 minutes.</div>"#,
        receipt.seats.len(),
        receipt.total
    )
}
