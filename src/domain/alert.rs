//! Alert decisions and Telegram-markdown formatting

/// Relative change against the new floor: `(floor - previous) / floor`.
///
/// A zero floor gives a non-finite value; such floors are normally outside the
/// alert band anyway.
pub fn percent_change(previous: f64, floor: f64) -> f64 {
    (floor - previous) / floor
}

/// Alerts fire only strictly inside `(min, max)`
pub fn within_band(floor: f64, min: f64, max: f64) -> bool {
    floor > min && floor < max
}

/// Render one alert line, e.g. `[okay_bears](https://..): 5.0000*(+20.00%)*`.
///
/// Rises are bold, everything else is rendered as inline code.
pub fn format_alert(slug: &str, store_url: &str, floor: f64, change: f64) -> String {
    let mut line = format!("[{}]({}): {:.4}", slug, store_url, floor);
    if change > 0.0 {
        line.push_str(&format!("*(+{:.2}%)*", change * 100.0));
    } else {
        line.push_str(&format!("`({:.2}%)`", change * 100.0));
    }
    line
}
