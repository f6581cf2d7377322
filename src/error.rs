use derive_more::{Display, Error};

/// Rejected guess input. The session is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GuessError {
    #[display("Please enter a number.")]
    Empty,
    #[display("Invalid input. Please enter a valid number.")]
    NotANumber,
    #[display("No round is waiting for a guess.")]
    NotActive,
}

/// Parses the text typed into the guess field.
pub fn parse_guess(text: &str) -> Result<f64, GuessError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(GuessError::Empty);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(GuessError::NotANumber),
    }
}
