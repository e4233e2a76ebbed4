use std::collections::HashMap;

use sha1::{Digest, Sha1};

use crate::models::IntentLabel;

/// Deterministic text → fixed-length vector mapping with cosine geometry.
pub trait Embedder: Send + Sync {
    fn dimension(&self) -> usize;
    fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>>;
}

const OOV_BUCKETS: usize = 256;

/// Bag-of-words embedder over a fixed vocabulary. Every vocabulary word owns a
/// dimension; unknown words are hashed into a separate block so they dilute
/// the norm without ever overlapping an exemplar.
pub struct VocabularyEmbedder {
    vocab: HashMap<String, usize>,
}

impl VocabularyEmbedder {
    pub fn from_phrases<'a, I>(phrases: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut vocab = HashMap::new();
        for phrase in phrases {
            for token in tokenize(phrase) {
                let next = vocab.len();
                vocab.entry(token).or_insert(next);
            }
        }
        Self { vocab }
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocab.len()
    }

    fn slot(&self, token: &str) -> usize {
        match self.vocab.get(token) {
            Some(idx) => *idx,
            None => {
                let digest = Sha1::digest(token.as_bytes());
                let hash = digest
                    .iter()
                    .take(8)
                    .fold(0u64, |acc, b| (acc << 8) | u64::from(*b));
                self.vocab.len() + (hash % OOV_BUCKETS as u64) as usize
            }
        }
    }
}

impl Embedder for VocabularyEmbedder {
    fn dimension(&self) -> usize {
        self.vocab.len() + OOV_BUCKETS
    }

    fn embed(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        let mut vector = vec![0.0f32; self.dimension()];
        for token in tokenize(text) {
            vector[self.slot(&token)] += 1.0;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        Ok(vector)
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

struct Exemplar {
    phrase: String,
    label: IntentLabel,
    vector: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    pub phrase: String,
    pub label: IntentLabel,
    pub distance: f64,
}

/// Brute-force cosine nearest-neighbour index over labelled exemplars.
pub struct NeighborIndex {
    exemplars: Vec<Exemplar>,
    dimension: usize,
}

impl NeighborIndex {
    pub fn build(embedder: &dyn Embedder, exemplars: &[(&str, IntentLabel)]) -> anyhow::Result<Self> {
        anyhow::ensure!(!exemplars.is_empty(), "cannot build an index without exemplars");

        let mut built = Vec::with_capacity(exemplars.len());
        for (phrase, label) in exemplars {
            let vector = embedder.embed(phrase)?;
            anyhow::ensure!(
                vector.len() == embedder.dimension(),
                "embedding for {phrase:?} has {} dimensions, expected {}",
                vector.len(),
                embedder.dimension()
            );
            built.push(Exemplar {
                phrase: phrase.to_string(),
                label: *label,
                vector,
            });
        }

        Ok(Self {
            exemplars: built,
            dimension: embedder.dimension(),
        })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// The `k` closest exemplars by cosine distance. `k` is capped at the
    /// index size; ties keep insertion order.
    pub fn nearest(&self, query: &[f32], k: usize) -> Vec<Neighbor> {
        let mut scored: Vec<(usize, f64)> = self
            .exemplars
            .iter()
            .enumerate()
            .map(|(i, e)| (i, cosine_distance(query, &e.vector)))
            .collect();
        scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        scored
            .into_iter()
            .take(k.min(self.exemplars.len()))
            .map(|(i, distance)| Neighbor {
                phrase: self.exemplars[i].phrase.clone(),
                label: self.exemplars[i].label,
                distance,
            })
            .collect()
    }
}

fn cosine_distance(a: &[f32], b: &[f32]) -> f64 {
    let mut dot = 0.0f64;
    let mut na = 0.0f64;
    let mut nb = 0.0f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    if na == 0.0 || nb == 0.0 {
        return 1.0;
    }
    1.0 - dot / (na.sqrt() * nb.sqrt())
}
