use crate::time_series::WpmHistory;

/// Compute X (seconds) and Y (WPM) bounds for the results chart
pub fn compute_chart_params(history: &WpmHistory, duration_secs: u32) -> (f64, f64) {
    let highest_wpm = history.peak();

    let overall_duration = match history.points().last() {
        Some(p) => p.t,
        None => f64::from(duration_secs),
    }
    .max(1.0);

    // Leave headroom so the peak does not sit on the border.
    let y_max = (highest_wpm + highest_wpm / 10.0).ceil().max(10.0);

    (overall_duration, y_max)
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}
