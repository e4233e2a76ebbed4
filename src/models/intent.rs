use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Raw label produced by the scoring signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntentLabel {
    Adding,
    Scheduling,
    Updating,
}

impl IntentLabel {
    pub const ALL: [IntentLabel; 3] = [
        IntentLabel::Adding,
        IntentLabel::Scheduling,
        IntentLabel::Updating,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IntentLabel::Adding => "ADDING",
            IntentLabel::Scheduling => "SCHEDULING",
            IntentLabel::Updating => "UPDATING",
        }
    }
}

/// The business goal handed to the CRM layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessIntent {
    LeadCreate,
    VisitSchedule,
    LeadUpdate,
    Unknown,
}

impl BusinessIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessIntent::LeadCreate => "LEAD_CREATE",
            BusinessIntent::VisitSchedule => "VISIT_SCHEDULE",
            BusinessIntent::LeadUpdate => "LEAD_UPDATE",
            BusinessIntent::Unknown => "UNKNOWN",
        }
    }
}

impl From<IntentLabel> for BusinessIntent {
    fn from(label: IntentLabel) -> Self {
        match label {
            IntentLabel::Adding => BusinessIntent::LeadCreate,
            IntentLabel::Scheduling => BusinessIntent::VisitSchedule,
            IntentLabel::Updating => BusinessIntent::LeadUpdate,
        }
    }
}

impl std::fmt::Display for BusinessIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score per intent label. Either sums to 1.0, or is all zeros when a
/// signal has no opinion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalDistribution {
    scores: BTreeMap<IntentLabel, f64>,
}

impl SignalDistribution {
    pub fn zeros() -> Self {
        Self::filled(0.0)
    }

    pub fn uniform() -> Self {
        Self::filled(1.0 / IntentLabel::ALL.len() as f64)
    }

    fn filled(value: f64) -> Self {
        Self {
            scores: IntentLabel::ALL.iter().map(|l| (*l, value)).collect(),
        }
    }

    /// Normalises raw per-label totals so they sum to one. Labels missing from
    /// `raw` count as zero. Returns `None` when the totals sum to zero or less.
    pub fn normalize<I>(raw: I) -> Option<Self>
    where
        I: IntoIterator<Item = (IntentLabel, f64)>,
    {
        let mut totals: BTreeMap<IntentLabel, f64> =
            IntentLabel::ALL.iter().map(|l| (*l, 0.0)).collect();
        for (label, value) in raw {
            *totals.entry(label).or_insert(0.0) += value;
        }

        let sum: f64 = totals.values().sum();
        if sum <= 0.0 || !sum.is_finite() {
            return None;
        }

        for value in totals.values_mut() {
            *value /= sum;
        }
        Some(Self { scores: totals })
    }

    pub fn get(&self, label: IntentLabel) -> f64 {
        self.scores.get(&label).copied().unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.scores.values().sum()
    }

    pub fn is_zero(&self) -> bool {
        self.scores.values().all(|v| *v == 0.0)
    }

    /// Highest scoring label. Ties go to the earlier label.
    pub fn top(&self) -> (IntentLabel, f64) {
        let mut best = (IntentLabel::ALL[0], self.get(IntentLabel::ALL[0]));
        for label in IntentLabel::ALL.iter().skip(1) {
            let score = self.get(*label);
            if score > best.1 {
                best = (*label, score);
            }
        }
        best
    }

    pub fn iter(&self) -> impl Iterator<Item = (IntentLabel, f64)> + '_ {
        self.scores.iter().map(|(l, v)| (*l, *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_sums_to_one() {
        let dist = SignalDistribution::normalize([
            (IntentLabel::Adding, 1.5),
            (IntentLabel::Scheduling, 0.5),
        ])
        .unwrap();
        assert!((dist.total() - 1.0).abs() < 1e-9);
        assert!((dist.get(IntentLabel::Adding) - 0.75).abs() < 1e-9);
        assert_eq!(dist.get(IntentLabel::Updating), 0.0);
    }

    #[test]
    fn test_normalize_rejects_zero_mass() {
        assert!(SignalDistribution::normalize([(IntentLabel::Adding, 0.0)]).is_none());
        assert!(SignalDistribution::normalize(std::iter::empty()).is_none());
    }

    #[test]
    fn test_top_prefers_first_label_on_tie() {
        let dist = SignalDistribution::uniform();
        assert_eq!(dist.top().0, IntentLabel::Adding);
    }

    #[test]
    fn test_serializes_as_label_map() {
        let json = serde_json::to_value(SignalDistribution::zeros()).unwrap();
        assert_eq!(json["ADDING"], 0.0);
        assert_eq!(json["UPDATING"], 0.0);
    }

    #[test]
    fn test_every_label_maps_to_business_intent() {
        assert_eq!(BusinessIntent::from(IntentLabel::Adding), BusinessIntent::LeadCreate);
        assert_eq!(BusinessIntent::from(IntentLabel::Scheduling), BusinessIntent::VisitSchedule);
        assert_eq!(BusinessIntent::from(IntentLabel::Updating), BusinessIntent::LeadUpdate);
    }
}
