//! # aisle Classify
//!
//! Decision layer on top of the aisle vector catalog.
//!
//! ## Features
//!
//! - **Classifier**: k-nearest-neighbor category prediction with a top-match
//!   override, a low-confidence gate and a similarity-weighted vote
//! - **Autocomplete**: lexical prefix/contains ranking, optionally replaced by
//!   embedding similarity with a boost for textual prefix matches
//! - **Lexical fallback**: prefix-count classification when no embedding exists
//! - **Engine**: text-level facade that recovers from encoder failures
//!
//! ## Example
//!
//! ```rust
//! use aisle_classify::{Classifier, ClassifierConfig};
//! use aisle_core::{Catalog, CatalogEntry, Category, Vector};
//!
//! let catalog = Catalog::load(vec![
//!     CatalogEntry::new("Cheddar", Vector::new(vec![1.0, 0.0]), Category::Dairy),
//!     CatalogEntry::new("Baguette", Vector::new(vec![0.0, 1.0]), Category::Bakery),
//! ])
//! .unwrap();
//!
//! let classifier = Classifier::new(ClassifierConfig::default());
//! let query = Vector::new(vec![0.98, 0.199]).normalized();
//! let result = classifier.classify(Some(&query), &catalog).unwrap();
//! assert_eq!(result.category, Category::Dairy);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! text ──> Engine ──> TextEncoder ──> Vector ──┬──> Classifier ──> ClassificationResult
//!            │              (fails)            │
//!            │                 └──> lexical ───┤
//!            │                      fallback   └──> AutocompleteRanker ──> [Suggestion]
//!            └──────────── Arc<Catalog> (read-only, shared) ────────────┘
//! ```

pub mod autocomplete;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod fallback;

pub use autocomplete::{AutocompleteRanker, Suggestion};
pub use classifier::{ClassificationResult, Classifier};
pub use config::{ClassifierConfig, ConfidencePolicy, SuggestConfig};
pub use engine::Engine;
pub use fallback::{classify_by_prefix, FALLBACK_CONFIDENCE, FALLBACK_MAX_MATCHES};
