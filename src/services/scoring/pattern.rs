use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::models::{IntentLabel, SignalDistribution};

const ADDING_PATTERNS: &[&str] = &[
    // international / local phone numbers
    r"(?:\+?\d{1,3}[-.\s]?)?(?:\(?\d{2,4}\)?[-.\s]?)?\d{6,12}\b",
    // strict 10-digit phones
    r"\b(?:\+91|0)?\d{10}\b",
    r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
    // separated digit groups
    r"(?:\+?\d{1,3}[-.\s]*)?(?:\d[-.\s]*){6,14}\d",
    // bare country code
    r"\+\d{1,3}\b",
];

const SCHEDULING_PATTERNS: &[&str] = &[
    r"\b\d{4}-\d{2}-\d{2}\b",
    r"\b\d{1,2}[/\-]\d{1,2}[/\-]\d{2,4}\b",
    r"\b\d{1,2}(?:st|nd|rd|th)?\s+(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|jun(?:e)?|jul(?:y)?|aug(?:ust)?|sep(?:tember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\b",
    r"\b(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|jun(?:e)?|jul(?:y)?|aug(?:ust)?|sep(?:tember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\s+\d{1,2}\b",
    r"\b(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
    r"\b\d{1,2}(?::\d{2})?\s?(?:am|pm|a\.m\.|p\.m\.|hrs|hours)?\b",
    r"\b\d{1,2}:\d{2}\b",
    r"\b\d{1,2}\s+o'?clock\b",
    r"\bat\s+\d{1,2}(?::\d{2})?\b",
];

pub const DEFAULT_PATTERNS: &[(IntentLabel, &[&str])] = &[
    (IntentLabel::Adding, ADDING_PATTERNS),
    (IntentLabel::Scheduling, SCHEDULING_PATTERNS),
];

#[derive(Debug, Clone, Copy)]
pub struct RegexSettings {
    pub per_match_score: f64,
    pub max_per_intent: Option<f64>,
    pub overlapping: bool,
}

impl Default for RegexSettings {
    fn default() -> Self {
        Self {
            per_match_score: 0.5,
            max_per_intent: Some(2.0),
            overlapping: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegexMatch {
    pub label: IntentLabel,
    pub pattern: String,
    pub text: String,
}

/// Pattern-based intent hinting. The compiled table is immutable once built.
pub struct RegexSignalScorer {
    table: Vec<(IntentLabel, Vec<Regex>)>,
    settings: RegexSettings,
}

impl RegexSignalScorer {
    pub fn new(settings: RegexSettings) -> Self {
        Self::with_patterns(DEFAULT_PATTERNS, settings)
    }

    /// Compiles a custom table. Patterns that fail to compile are skipped.
    pub fn with_patterns(table: &[(IntentLabel, &[&str])], settings: RegexSettings) -> Self {
        let table = table
            .iter()
            .map(|(label, patterns)| {
                let compiled = patterns
                    .iter()
                    .filter_map(|p| {
                        match RegexBuilder::new(p).case_insensitive(true).build() {
                            Ok(re) => Some(re),
                            Err(e) => {
                                tracing::warn!(label = label.as_str(), pattern = %p, error = %e, "skipping malformed intent pattern");
                                None
                            }
                        }
                    })
                    .collect();
                (*label, compiled)
            })
            .collect();

        Self { table, settings }
    }

    pub fn pattern_count(&self) -> usize {
        self.table.iter().map(|(_, p)| p.len()).sum()
    }

    pub fn score(&self, text: &str) -> (SignalDistribution, Vec<RegexMatch>) {
        if text.is_empty() {
            return (SignalDistribution::zeros(), Vec::new());
        }

        let mut totals = Vec::with_capacity(self.table.len());
        let mut matches = Vec::new();

        for (label, patterns) in &self.table {
            let mut total = 0.0;
            for re in patterns {
                for found in self.find_all(re, text) {
                    total += self.settings.per_match_score;
                    matches.push(RegexMatch {
                        label: *label,
                        pattern: re.as_str().to_string(),
                        text: found.to_string(),
                    });
                }
            }
            if let Some(cap) = self.settings.max_per_intent {
                total = total.min(cap);
            }
            totals.push((*label, total));
        }

        let dist = SignalDistribution::normalize(totals).unwrap_or_else(SignalDistribution::zeros);
        (dist, matches)
    }

    fn find_all<'t>(&self, re: &Regex, text: &'t str) -> Vec<&'t str> {
        if !self.settings.overlapping {
            return re.find_iter(text).map(|m| m.as_str()).collect();
        }

        // Restart one character past every match start.
        let mut found = Vec::new();
        let mut pos = 0;
        while pos <= text.len() {
            let Some(m) = re.find_at(text, pos) else {
                break;
            };
            found.push(m.as_str());
            let step = text[m.start()..].chars().next().map_or(1, char::len_utf8);
            pos = m.start() + step;
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> RegexSignalScorer {
        RegexSignalScorer::new(RegexSettings::default())
    }

    #[test]
    fn test_no_match_is_all_zero() {
        let (dist, matches) = scorer().score("Can you help me?");
        assert!(dist.is_zero());
        assert!(matches.is_empty());
    }

    #[test]
    fn test_empty_text_is_all_zero() {
        let (dist, _) = scorer().score("");
        assert!(dist.is_zero());
    }

    #[test]
    fn test_phone_number_points_to_adding() {
        let (dist, matches) = scorer().score("phone 9876543210");
        assert!((dist.get(IntentLabel::Adding) - 1.0).abs() < 1e-9);
        assert!(matches.iter().all(|m| m.label == IntentLabel::Adding));
        assert!(matches.iter().any(|m| m.text == "9876543210"));
    }

    #[test]
    fn test_clock_time_points_to_scheduling() {
        let (dist, matches) = scorer().score("visit at 3 pm on Monday");
        assert!((dist.get(IntentLabel::Scheduling) - 1.0).abs() < 1e-9);
        assert!(matches.iter().any(|m| m.text.eq_ignore_ascii_case("monday")));
    }

    #[test]
    fn test_cap_limits_verbose_field() {
        // Five weekdays would be 2.5 uncapped; one phone gives Adding some mass.
        let text = "monday tuesday wednesday thursday friday 9876543210";
        let capped = RegexSignalScorer::new(RegexSettings::default()).score(text).0;
        let uncapped = RegexSignalScorer::new(RegexSettings {
            max_per_intent: None,
            ..Default::default()
        })
        .score(text)
        .0;
        assert!(capped.get(IntentLabel::Adding) > uncapped.get(IntentLabel::Adding));
        assert!((capped.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_overlapping_mode_counts_more() {
        let table: &[(IntentLabel, &[&str])] = &[(IntentLabel::Adding, &[r"\d{3}"])];
        let plain = RegexSignalScorer::with_patterns(
            table,
            RegexSettings {
                max_per_intent: None,
                ..Default::default()
            },
        );
        let overlapping = RegexSignalScorer::with_patterns(
            table,
            RegexSettings {
                max_per_intent: None,
                overlapping: true,
                ..Default::default()
            },
        );
        assert_eq!(plain.score("12345").1.len(), 1);
        assert_eq!(overlapping.score("12345").1.len(), 3);
    }

    #[test]
    fn test_malformed_pattern_is_skipped() {
        let table: &[(IntentLabel, &[&str])] = &[(IntentLabel::Updating, &[r"(unclosed", r"\bwon\b"])];
        let scorer = RegexSignalScorer::with_patterns(table, RegexSettings::default());
        assert_eq!(scorer.pattern_count(), 1);
        let (dist, _) = scorer.score("mark it as won");
        assert!((dist.get(IntentLabel::Updating) - 1.0).abs() < 1e-9);
    }
}
