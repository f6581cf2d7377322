/// Compute X (guess number) and Y (absolute error) bounds for the game over chart
pub fn compute_chart_params(errors: &[f64]) -> (f64, f64) {
    let worst = errors.iter().copied().fold(0.0_f64, f64::max);
    // keeps the x axis from collapsing to a point
    let overall_guesses = (errors.len() as f64).max(2.0);
    let highest_error = if worst > 0.0 { worst } else { 0.1 };

    (overall_guesses, highest_error)
}

/// Points for the chart, numbering guesses from 1.
pub fn error_series(errors: &[f64]) -> Vec<(f64, f64)> {
    errors
        .iter()
        .enumerate()
        .map(|(i, e)| ((i + 1) as f64, *e))
        .collect()
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}
