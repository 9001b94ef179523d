//! Failure block rendered into the content region

use rand::seq::SliceRandom;

use crate::types::TransportFailure;

/// Opening lines picked at random for each failure block
pub const FLAVOR_LINES: &[&str] = &[
    "Oops, something went wrong.",
    "Well, that did not go as planned.",
    "Houston, we have a problem.",
    "The server did not like that.",
    "Something broke on the way to the server.",
    "That request got lost somewhere.",
];

/// Render the fixed-format error block for a failed call
pub fn render_error_block(failure: &TransportFailure) -> String {
    let flavor = FLAVOR_LINES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(FLAVOR_LINES[0]);

    let status = failure
        .status
        .map(|status| format!("<br>HTTP status: {status}"))
        .unwrap_or_default();

    format!(
        "<div class=\"ajax-error\"><h3>{}</h3><p>Error: {}{}<br>Call: {}</p></div>",
        escape(flavor),
        escape(&failure.reason),
        status,
        escape(&failure.url),
    )
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
