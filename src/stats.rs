use itertools::{Itertools, MinMaxResult};

use crate::session::Session;

pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Population standard deviation.
pub fn std_dev(data: &[f64]) -> Option<f64> {
    let data_mean = mean(data)?;
    let variance = data
        .iter()
        .map(|value| {
            let diff = data_mean - *value;
            diff * diff
        })
        .sum::<f64>()
        / data.len() as f64;

    Some(variance.sqrt())
}

/// End-of-game numbers shown on the game over screen
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorSummary {
    pub rounds: u32,
    pub guesses: usize,
    pub total_score: u32,
    pub mean_error: f64,
    pub std_dev: f64,
    pub best_error: Option<f64>,
    pub worst_error: Option<f64>,
}

impl ErrorSummary {
    pub fn from_session(session: &Session) -> Self {
        let errors = session.error_history();
        let (best_error, worst_error) = match errors
            .iter()
            .copied()
            .minmax_by(|a, b| a.total_cmp(b))
        {
            MinMaxResult::NoElements => (None, None),
            MinMaxResult::OneElement(e) => (Some(e), Some(e)),
            MinMaxResult::MinMax(lo, hi) => (Some(lo), Some(hi)),
        };

        Self {
            rounds: session.round_number(),
            guesses: errors.len(),
            total_score: session.total_score(),
            mean_error: session.running_mean_error(),
            std_dev: std_dev(errors).unwrap_or(0.0),
            best_error,
            worst_error,
        }
    }

    /// Errors are shown with three decimals, `N/A` before the first guess.
    pub fn format_error(value: Option<f64>) -> String {
        value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.3}"))
    }
}
