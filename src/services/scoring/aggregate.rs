use crate::models::{IntentLabel, SignalDistribution};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalWeights {
    pub verb: f64,
    pub keyword: f64,
    pub regex: f64,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            verb: 1.0 / 3.0,
            keyword: 1.0 / 3.0,
            regex: 1.0 / 3.0,
        }
    }
}

/// Averages the three signal distributions and renormalises. When every
/// signal abstained the result is uniform.
pub fn combine(
    verb: &SignalDistribution,
    keyword: &SignalDistribution,
    regex: &SignalDistribution,
) -> SignalDistribution {
    combine_weighted(verb, keyword, regex, SignalWeights::default())
}

pub fn combine_weighted(
    verb: &SignalDistribution,
    keyword: &SignalDistribution,
    regex: &SignalDistribution,
    weights: SignalWeights,
) -> SignalDistribution {
    let raw = IntentLabel::ALL.iter().map(|label| {
        let score = weights.verb * verb.get(*label)
            + weights.keyword * keyword.get(*label)
            + weights.regex * regex.get(*label);
        (*label, score)
    });
    SignalDistribution::normalize(raw).unwrap_or_else(SignalDistribution::uniform)
}
