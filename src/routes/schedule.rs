//! `/api/schedule` route: the tour dates table.

use crate::site::schedule::{TOUR, bookable};

/// Handle GET /api/schedule
pub fn handle_get(_query: &str) -> String {
    let mut html = format!(
        r#"<p class="mb-4 text-center text-sm text-gray-400"><span data-on-sale>{}</span> of {} dates still on sale</p>"#,
        bookable().count(),
        TOUR.len()
    );
    html.push_str(r#"<div class="grid gap-4 md:grid-cols-2">"#);
    for date in &TOUR {
        html.push_str(r#"<div class="rounded-lg border border-yellow-500/30 bg-gray-900 p-4">"#);
        html.push_str(&format!(
            r#"<p class="text-lg font-bold">{}</p><p class="text-sm text-gray-400">{}</p>"#,
            date.city, date.venue
        ));
        html.push_str(&format!(
            r#"<p class="mt-2">{} &middot; {}</p><p class="text-yellow-400">{}</p>"#,
            date.date, date.time, date.price
        ));
        if date.available {
            html.push_str(r##"<a href="#tickets" data-track="ticket-purchase" class="mt-3 inline-block rounded bg-red-800 px-4 py-2 font-bold hover:bg-red-700">Buy tickets</a>"##);
        } else {
            html.push_str(r#"<span class="mt-3 inline-block rounded bg-gray-700 px-4 py-2 text-gray-400">Sold out</span>"#);
        }
        html.push_str("</div>");
    }
    html.push_str("</div>");
    html
}
