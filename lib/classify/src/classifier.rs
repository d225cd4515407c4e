//! Nearest-neighbor category classifier
//!
//! Decision policy, evaluated in order:
//!
//! 1. No query vector or empty catalog: `Other` with confidence 0.
//! 2. No neighbors found: same.
//! 3. Top similarity above the top-match threshold: the best neighbor's
//!    category, trusted outright.
//! 4. Confidence below the gate: `Other`.
//! 5. Otherwise a similarity-weighted vote over the neighbors.

use aisle_core::{find_nearest, Catalog, Category, Neighbor, Result, Vector};
use serde::Serialize;
use smallvec::SmallVec;
use tracing::debug;

use crate::config::{ClassifierConfig, ConfidencePolicy};

/// Predicted category with its confidence and supporting neighbors
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationResult {
    pub category: Category,
    pub confidence: f32,
    /// Best match first
    pub neighbors: Vec<Neighbor>,
}

impl ClassificationResult {
    /// The "no match" answer
    #[must_use]
    pub fn other() -> Self {
        Self {
            category: Category::Other,
            confidence: 0.0,
            neighbors: Vec::new(),
        }
    }
}

/// Per-category accumulated weight, kept in first-seen order
pub(crate) type Tally = SmallVec<[(Category, f32); 8]>;

pub(crate) fn add_to_tally(tally: &mut Tally, category: Category, weight: f32) {
    match tally.iter_mut().find(|(c, _)| *c == category) {
        Some((_, total)) => *total += weight,
        None => tally.push((category, weight)),
    }
}

/// Category with the strictly greatest weight; ties go to the one seen first
pub(crate) fn tally_winner(tally: &Tally) -> Option<Category> {
    let mut best: Option<(Category, f32)> = None;
    for &(category, weight) in tally {
        match best {
            Some((_, top)) if weight <= top => {}
            _ => best = Some((category, weight)),
        }
    }
    best.map(|(category, _)| category)
}

#[derive(Debug, Clone, Default)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify a query vector against the catalog.
    ///
    /// A missing vector or an empty catalog is not an error: the result is
    /// `Other` with confidence 0. Only a query of the wrong dimension fails.
    pub fn classify(&self, query: Option<&Vector>, catalog: &Catalog) -> Result<ClassificationResult> {
        let query = match query {
            Some(q) if !catalog.is_empty() => q,
            _ => return Ok(ClassificationResult::other()),
        };

        let neighbors = find_nearest(query, catalog, self.config.k)?;
        Ok(self.decide(neighbors))
    }

    /// Apply the decision policy to neighbors already sorted best first
    pub fn decide(&self, neighbors: Vec<Neighbor>) -> ClassificationResult {
        let top_similarity = match neighbors.first() {
            Some(best) => best.similarity,
            None => return ClassificationResult::other(),
        };

        if let Some(threshold) = self.config.top_match_threshold {
            if top_similarity > threshold {
                let category = neighbors[0].entry.category;
                debug!(
                    "Top match '{}' ({:.3}) overrides vote",
                    neighbors[0].entry.name, top_similarity
                );
                return ClassificationResult {
                    category,
                    confidence: top_similarity,
                    neighbors,
                };
            }
        }

        let confidence = match self.config.confidence_policy {
            ConfidencePolicy::TopNeighbor => top_similarity,
            ConfidencePolicy::MeanSimilarity => {
                neighbors.iter().map(|n| n.similarity).sum::<f32>() / neighbors.len() as f32
            }
        };

        if confidence < self.config.confidence_threshold {
            debug!(
                "Confidence {:.3} below threshold {:.3}",
                confidence, self.config.confidence_threshold
            );
            return ClassificationResult {
                category: Category::Other,
                confidence,
                neighbors,
            };
        }

        let mut tally = Tally::new();
        for neighbor in &neighbors {
            add_to_tally(&mut tally, neighbor.entry.category, neighbor.similarity);
        }
        let category = tally_winner(&tally).unwrap_or_default();
        debug!("Weighted vote {:?} -> {}", tally, category);

        ClassificationResult {
            category,
            confidence,
            neighbors,
        }
    }
}
