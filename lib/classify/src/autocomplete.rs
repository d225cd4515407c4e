//! Autocomplete ranking
//!
//! Each call runs in one of two modes, and the mode picks the candidate
//! generator:
//!
//! - lexical: case-insensitive prefix matches (`prefix_score`) and
//!   contains-but-not-prefix matches (`contains_score`), in catalog order
//! - semantic: the `2 * limit` nearest entries to the query vector, with a
//!   small boost for names that start with the typed text
//!
//! Either way the candidates go through the same merge: sort by score
//! descending (stable), drop repeated names, truncate to `limit`.

use ahash::AHashSet;
use aisle_core::{find_nearest, Catalog, Category, Result, Vector};
use serde::Serialize;
use tracing::debug;

use crate::config::SuggestConfig;

/// One autocomplete suggestion
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub name: String,
    pub category: Category,
    pub score: f32,
    pub is_lexical_match: bool,
}

#[derive(Debug, Clone, Default)]
pub struct AutocompleteRanker {
    config: SuggestConfig,
}

impl AutocompleteRanker {
    pub fn new(config: SuggestConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SuggestConfig {
        &self.config
    }

    /// Whether `partial_text` is long enough to be worth embedding
    pub fn wants_embedding(&self, partial_text: &str) -> bool {
        partial_text.trim().chars().count() >= self.config.min_embed_chars
    }

    /// Rank suggestions for partially typed text.
    ///
    /// Runs lexical-only when `query` is absent or the input is shorter than
    /// `min_embed_chars`; otherwise ranks the nearest neighbors of `query`.
    /// Never returns more than `limit` entries or the same name twice.
    pub fn suggest(
        &self,
        partial_text: &str,
        catalog: &Catalog,
        limit: usize,
        query: Option<&Vector>,
    ) -> Result<Vec<Suggestion>> {
        let needle = partial_text.trim().to_lowercase();
        if needle.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let candidates = match query {
            Some(query) if self.wants_embedding(&needle) => {
                self.semantic_candidates(&needle, catalog, limit, query)?
            }
            _ => self.lexical_candidates(&needle, catalog),
        };

        let suggestions = merge(candidates, limit);
        debug!("{} suggestions for '{}'", suggestions.len(), needle);
        Ok(suggestions)
    }

    /// Prefix and contains matches in catalog order
    fn lexical_candidates(&self, needle: &str, catalog: &Catalog) -> Vec<Suggestion> {
        catalog
            .iter()
            .filter_map(|entry| {
                let name = entry.name_lower();
                let score = if name.starts_with(needle) {
                    self.config.prefix_score
                } else if name.contains(needle) {
                    self.config.contains_score
                } else {
                    return None;
                };
                Some(Suggestion {
                    name: entry.name.clone(),
                    category: entry.category,
                    score,
                    is_lexical_match: true,
                })
            })
            .collect()
    }

    /// Nearest neighbors, boosted when they also start with the typed text
    fn semantic_candidates(
        &self,
        needle: &str,
        catalog: &Catalog,
        limit: usize,
        query: &Vector,
    ) -> Result<Vec<Suggestion>> {
        let neighbors = find_nearest(query, catalog, limit.saturating_mul(2))?;
        Ok(neighbors
            .into_iter()
            .map(|neighbor| {
                let is_prefix = neighbor.entry.name_lower().starts_with(needle);
                let score = if is_prefix {
                    (neighbor.similarity + self.config.lexical_boost).min(1.0)
                } else {
                    neighbor.similarity
                };
                Suggestion {
                    name: neighbor.entry.name.clone(),
                    category: neighbor.entry.category,
                    score,
                    is_lexical_match: is_prefix,
                }
            })
            .collect())
    }
}

/// Stable sort by score descending, first occurrence of each name wins
fn merge(mut candidates: Vec<Suggestion>, limit: usize) -> Vec<Suggestion> {
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut seen = AHashSet::with_capacity(limit.min(candidates.len()));
    candidates
        .into_iter()
        .filter(|s| seen.insert(s.name.clone()))
        .take(limit)
        .collect()
}
