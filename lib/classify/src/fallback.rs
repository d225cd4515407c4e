//! Lexical classification used when no embedding is available

use aisle_core::{Catalog, Neighbor};

use crate::classifier::{add_to_tally, tally_winner, ClassificationResult, Tally};

/// Fixed confidence (and per-neighbor similarity) reported for prefix matches
pub const FALLBACK_CONFIDENCE: f32 = 0.7;

/// Maximum number of prefix matches consulted
pub const FALLBACK_MAX_MATCHES: usize = 5;

/// Classify by catalog names that start with `text` (case-insensitive).
///
/// Surrounding whitespace in `text` is ignored, so `" ba"` matches like
/// `"ba"`; a blank input matches nothing.
///
/// Takes the first [`FALLBACK_MAX_MATCHES`] matches in catalog order and
/// picks the category with the most matches; ties go to the category seen
/// first. No matches gives `Other` with confidence 0.
pub fn classify_by_prefix(text: &str, catalog: &Catalog) -> ClassificationResult {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return ClassificationResult::other();
    }

    let neighbors: Vec<Neighbor> = catalog
        .iter()
        .filter(|entry| entry.name_lower().starts_with(&needle))
        .take(FALLBACK_MAX_MATCHES)
        .map(|entry| Neighbor::new(entry.clone(), FALLBACK_CONFIDENCE))
        .collect();

    let mut tally = Tally::new();
    for neighbor in &neighbors {
        add_to_tally(&mut tally, neighbor.entry.category, 1.0);
    }

    match tally_winner(&tally) {
        Some(category) => ClassificationResult {
            category,
            confidence: FALLBACK_CONFIDENCE,
            neighbors,
        },
        None => ClassificationResult::other(),
    }
}
