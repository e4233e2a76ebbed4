use std::sync::Arc;

use anyhow::Context;

use super::embedding::{Embedder, Neighbor, NeighborIndex};
use crate::models::{IntentLabel, SignalDistribution};

/// Nearest-neighbour intent signal over one exemplar set.
pub struct SemanticSignalScorer {
    name: &'static str,
    embedder: Arc<dyn Embedder>,
    index: NeighborIndex,
}

impl SemanticSignalScorer {
    pub fn build(
        name: &'static str,
        embedder: Arc<dyn Embedder>,
        exemplars: &[(&str, IntentLabel)],
    ) -> anyhow::Result<Self> {
        let index = NeighborIndex::build(embedder.as_ref(), exemplars)
            .with_context(|| format!("failed to build {name} index"))?;
        tracing::debug!(index = name, exemplars = exemplars.len(), "built exemplar index");
        Ok(Self {
            name,
            embedder,
            index,
        })
    }

    pub fn score(&self, text: &str, k: usize) -> anyhow::Result<SignalDistribution> {
        let query = self.embedder.embed(text)?;
        self.score_vector(&query, k)
    }

    /// Scores a precomputed embedding. Falls back to uniform when no neighbour
    /// carries positive similarity.
    pub fn score_vector(&self, query: &[f32], k: usize) -> anyhow::Result<SignalDistribution> {
        anyhow::ensure!(
            query.len() == self.index.dimension(),
            "{} index expects {} dimensions, got {}",
            self.name,
            self.index.dimension(),
            query.len()
        );
        anyhow::ensure!(
            query.iter().all(|v| v.is_finite()),
            "embedding contains non-finite values"
        );

        let neighbors = self.index.nearest(query, k);
        log_neighbors(self.name, &neighbors);

        let mass = neighbors
            .iter()
            .map(|n| (n.label, (1.0 - n.distance).max(0.0)));
        Ok(SignalDistribution::normalize(mass).unwrap_or_else(SignalDistribution::uniform))
    }
}

fn log_neighbors(index: &str, neighbors: &[Neighbor]) {
    if !tracing::enabled!(tracing::Level::TRACE) {
        return;
    }
    for (rank, n) in neighbors.iter().enumerate() {
        tracing::trace!(
            index,
            rank = rank + 1,
            phrase = %n.phrase,
            label = n.label.as_str(),
            similarity = 1.0 - n.distance,
            "neighbour"
        );
    }
}
