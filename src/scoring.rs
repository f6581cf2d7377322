/// Points a correct guess is worth under the pass/fail policy.
pub const THRESHOLD_POINTS: u32 = 10;
/// Best possible score under the Weber policy.
pub const WEBER_MAX_POINTS: u32 = 100;

/// How a guess is judged against the true distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoringPolicy {
    /// Pass/fail: correct when within `percentage` of the actual distance.
    Threshold { percentage: f64 },
    /// Tolerance `max(a, b * actual)`, rewarding near misses on a quadratic curve.
    Weber { a: f64, b: f64 },
}

impl ScoringPolicy {
    pub fn score(&self, actual: f64, guessed: f64) -> u32 {
        match *self {
            ScoringPolicy::Threshold { percentage } => {
                if within_threshold(actual, guessed, percentage) {
                    THRESHOLD_POINTS
                } else {
                    0
                }
            }
            ScoringPolicy::Weber { a, b } => weber_score(actual, guessed, a, b),
        }
    }

    pub fn is_correct(&self, actual: f64, guessed: f64) -> bool {
        match *self {
            ScoringPolicy::Threshold { percentage } => {
                within_threshold(actual, guessed, percentage)
            }
            ScoringPolicy::Weber { .. } => self.score(actual, guessed) > 0,
        }
    }

    /// Whether scores feed the running total.
    pub fn accumulates_score(&self) -> bool {
        matches!(self, ScoringPolicy::Weber { .. })
    }
}

pub fn within_threshold(actual: f64, guessed: f64, percentage: f64) -> bool {
    (actual - guessed).abs() <= actual * percentage
}

pub fn weber_tolerance(actual: f64, a: f64, b: f64) -> f64 {
    a.max(b * actual)
}

pub fn weber_score(actual: f64, guessed: f64, a: f64, b: f64) -> u32 {
    let error = (guessed - actual).abs();
    let tolerance = weber_tolerance(actual, a, b);

    if tolerance == 0.0 {
        return if error == 0.0 { WEBER_MAX_POINTS } else { 0 };
    }

    weber_points(error / tolerance)
}

/// `floor(100 * (1 - ratio)^2)` for ratios below one, zero otherwise.
pub fn weber_points(ratio: f64) -> u32 {
    if ratio.is_nan() || ratio >= 1.0 {
        return 0;
    }
    let closeness = 1.0 - ratio;
    let points = (WEBER_MAX_POINTS as f64 * (closeness * closeness)).floor();
    points.max(0.0) as u32
}
