use chrono::{DateTime, Utc};
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

// Formats each x1000 step
pub fn format_number(number: u64) -> String {
    let num_str = number.to_string();
    let mut result = String::new();
    let len = num_str.len();

    for (i, c) in num_str.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

pub fn format_rating(rating: f64) -> String {
    format!("{:.1}", rating)
}

fn parse_timestamp(iso_date: &str) -> Option<DateTime<Utc>> {
    iso_date.parse::<DateTime<Utc>>().ok()
}

/// "May 1, 2024"
pub fn format_added_date(iso_date: &str) -> Option<String> {
    parse_timestamp(iso_date).map(|date| date.format("%b %-d, %Y").to_string())
}

pub fn week_label(iso_date: &str, now: DateTime<Utc>) -> Option<String> {
    let date = parse_timestamp(iso_date)?;
    let days = now.signed_duration_since(date).num_days();

    Some(match days {
        d if d < 7 => "Current Week".to_string(),
        d if d < 14 => "Last Week".to_string(),
        d => format!("{} weeks ago", d / 7),
    })
}

pub fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

/// Runs `f` once after `delay` on the browser event loop.
pub fn set_timeout(delay: Duration, f: impl FnOnce() + 'static) {
    let Some(window) = web_sys::window() else {
        log::warn!("No window; dropping timer");
        return;
    };

    let callback = Closure::once_into_js(f);
    let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
    if let Err(e) = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
    {
        log::error!("Failed to schedule timer: {:?}", e);
    }
}

pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}
