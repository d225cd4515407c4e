//! Engine configuration
//!
//! Fixed for the lifetime of a deployment; nothing here is per-call state.

use aisle_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// How the classifier turns neighbor similarities into a confidence score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidencePolicy {
    /// Similarity of the best neighbor
    #[default]
    TopNeighbor,
    /// Mean similarity over all returned neighbors
    MeanSimilarity,
}

/// Classifier settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Number of neighbors consulted per query
    pub k: usize,
    /// Below this confidence the answer is `Other`
    pub confidence_threshold: f32,
    /// Above this top similarity the best neighbor wins outright; `None` disables the override
    pub top_match_threshold: Option<f32>,
    pub confidence_policy: ConfidencePolicy,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            k: 5,
            confidence_threshold: 0.5,
            top_match_threshold: Some(0.95),
            confidence_policy: ConfidencePolicy::TopNeighbor,
        }
    }
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(Error::InvalidConfig("k must be at least 1".to_string()));
        }
        check_unit_range("confidence_threshold", self.confidence_threshold)?;
        if let Some(threshold) = self.top_match_threshold {
            check_unit_range("top_match_threshold", threshold)?;
        }
        Ok(())
    }
}

/// Autocomplete settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestConfig {
    /// Shorter inputs never use embedding search
    pub min_embed_chars: usize,
    pub prefix_score: f32,
    pub contains_score: f32,
    /// Added to a semantic candidate whose name starts with the input, capped at 1.0
    pub lexical_boost: f32,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            min_embed_chars: 3,
            prefix_score: 1.0,
            contains_score: 0.8,
            lexical_boost: 0.1,
        }
    }
}

impl SuggestConfig {
    pub fn validate(&self) -> Result<()> {
        check_unit_range("prefix_score", self.prefix_score)?;
        check_unit_range("contains_score", self.contains_score)?;
        check_unit_range("lexical_boost", self.lexical_boost)?;
        if self.contains_score >= self.prefix_score {
            return Err(Error::InvalidConfig(format!(
                "contains_score ({}) must be lower than prefix_score ({})",
                self.contains_score, self.prefix_score
            )));
        }
        Ok(())
    }
}

fn check_unit_range(name: &str, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )))
    }
}
