use crate::models::{BusinessIntent, SignalDistribution};

/// Rounded top scores at or below this resolve to UNKNOWN.
pub const CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Rounds to one decimal place, ties to even.
pub fn round_one_decimal(score: f64) -> f64 {
    (score * 10.0).round_ties_even() / 10.0
}

pub fn resolve(combined: &SignalDistribution) -> BusinessIntent {
    let (label, score) = combined.top();
    if round_one_decimal(score) <= CONFIDENCE_THRESHOLD {
        return BusinessIntent::Unknown;
    }
    BusinessIntent::from(label)
}
