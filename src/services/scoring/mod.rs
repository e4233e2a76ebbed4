//! Multi-signal intent scoring.
//!
//! Three independent signals vote on the raw intent label:
//! - **verb** neighbours over short action-verb exemplars,
//! - **keyword** neighbours over domain keyword exemplars,
//! - **regex** hits over phone/email/date/time patterns.
//!
//! The signals are averaged into one distribution and thresholded into a
//! business intent.

pub mod aggregate;
pub mod embedding;
pub mod exemplars;
pub mod pattern;
pub mod resolve;
pub mod semantic;

use std::sync::Arc;

use serde::Serialize;

use crate::models::{BusinessIntent, SignalDistribution};
use embedding::{Embedder, VocabularyEmbedder};
use pattern::{RegexMatch, RegexSignalScorer};
use semantic::SemanticSignalScorer;

pub const DEFAULT_K: usize = 4;

#[derive(Debug, Clone, Serialize)]
pub struct ScoreBreakdown {
    pub verb_scores: SignalDistribution,
    pub keyword_scores: SignalDistribution,
    pub regex_scores: SignalDistribution,
    pub combined: SignalDistribution,
    pub regex_matches: Vec<RegexMatch>,
}

impl ScoreBreakdown {
    pub fn intent(&self) -> BusinessIntent {
        resolve::resolve(&self.combined)
    }
}

/// Read-only scoring context, built once at startup and shared by requests.
pub struct IntentScorer {
    embedder: Arc<dyn Embedder>,
    verbs: SemanticSignalScorer,
    keywords: SemanticSignalScorer,
    regex: RegexSignalScorer,
    k: usize,
}

impl IntentScorer {
    pub fn new(embedder: Arc<dyn Embedder>, regex: RegexSignalScorer, k: usize) -> anyhow::Result<Self> {
        let verbs = SemanticSignalScorer::build(
            "verb",
            Arc::clone(&embedder),
            &exemplars::flatten(exemplars::ACTION_VERBS),
        )?;
        let keywords = SemanticSignalScorer::build(
            "keyword",
            Arc::clone(&embedder),
            &exemplars::flatten(exemplars::DOMAIN_KEYWORDS),
        )?;

        Ok(Self {
            embedder,
            verbs,
            keywords,
            regex,
            k: k.max(1),
        })
    }

    /// Scorer backed by the vocabulary embedder over both exemplar sets.
    pub fn with_default_embedder(regex: RegexSignalScorer, k: usize) -> anyhow::Result<Self> {
        let phrases = exemplars::ACTION_VERBS
            .iter()
            .chain(exemplars::DOMAIN_KEYWORDS.iter())
            .flat_map(|(_, phrases)| phrases.iter().copied());
        let embedder = VocabularyEmbedder::from_phrases(phrases);
        Self::new(Arc::new(embedder), regex, k)
    }

    pub fn score(&self, text: &str) -> anyhow::Result<ScoreBreakdown> {
        let query = self.embedder.embed(text)?;
        let verb_scores = self.verbs.score_vector(&query, self.k)?;
        let keyword_scores = self.keywords.score_vector(&query, self.k)?;
        let (regex_scores, regex_matches) = self.regex.score(text);
        let combined = aggregate::combine(&verb_scores, &keyword_scores, &regex_scores);

        tracing::debug!(
            verb = ?verb_scores,
            keyword = ?keyword_scores,
            regex = ?regex_scores,
            matches = regex_matches.len(),
            "signal scores"
        );

        Ok(ScoreBreakdown {
            verb_scores,
            keyword_scores,
            regex_scores,
            combined,
            regex_matches,
        })
    }
}
