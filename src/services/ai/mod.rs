pub mod huggingface;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedEntity {
    #[serde(alias = "entity")]
    pub entity_group: String,
    pub word: String,
    #[serde(default)]
    pub score: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub labels: Vec<String>,
    pub scores: Vec<f32>,
}

impl Classification {
    /// Label with the highest score.
    pub fn top(&self) -> Option<(&str, f32)> {
        self.labels
            .iter()
            .zip(self.scores.iter())
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(l, s)| (l.as_str(), *s))
            .or_else(|| self.labels.first().map(|l| (l.as_str(), 0.0)))
    }
}

/// Named-entity tagging model.
#[async_trait]
pub trait EntityTagger: Send + Sync {
    async fn tag(&self, text: &str) -> anyhow::Result<Vec<TaggedEntity>>;
}

/// Zero-shot text classification model.
#[async_trait]
pub trait StatusClassifier: Send + Sync {
    async fn classify(&self, text: &str, candidate_labels: &[&str]) -> anyhow::Result<Classification>;
}
