//! Display formatting for route durations and distances.

/// Formats a duration given in seconds.
///
/// Under a minute renders rounded seconds (`"42s"`); otherwise hours and
/// minutes, dropping a zero minute component when hours are shown
/// (`"1 hr"`, `"1 hr 30 min"`, `"5 min"`).
///
/// Inputs in `[59.5, 60)` round to `"60s"` rather than `"1 min"`.
pub fn format_duration(total_seconds: f64) -> String {
    let total_seconds = clamp_non_negative(total_seconds);

    if total_seconds < 60.0 {
        return format!("{}s", total_seconds.round() as u64);
    }

    let hours = (total_seconds / 3600.0).floor() as u64;
    let minutes = ((total_seconds % 3600.0) / 60.0).floor() as u64;

    let mut rendered = String::new();
    if hours > 0 {
        rendered.push_str(&format!("{} hr ", hours));
    }
    if minutes > 0 || hours == 0 {
        rendered.push_str(&format!("{} min", minutes));
    }

    rendered.trim().to_string()
}

/// Formats a distance given in meters as kilometers with one decimal.
///
/// Halves round up, so 1250 m is `"1.3 km"`.
pub fn format_distance(meters: f64) -> String {
    let tenths_of_km = (clamp_non_negative(meters) / 100.0).round();
    format!("{:.1} km", tenths_of_km / 10.0)
}

fn clamp_non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}
