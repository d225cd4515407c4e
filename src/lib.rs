//! # aisle
//!
//! Classifies short grocery item names into a fixed set of categories and
//! suggests catalog items as the user types, using precomputed embeddings of
//! a reference catalog.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! aisle --catalog data/sample_catalog.json --encoder-url http://localhost:3001
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use aisle::prelude::*;
//! use std::sync::Arc;
//!
//! let catalog = Catalog::load(vec![
//!     CatalogEntry::new("Apple", Vector::new(vec![1.0, 0.0]), Category::Produce),
//!     CatalogEntry::new("Apple Juice", Vector::new(vec![0.0, 1.0]), Category::Beverages),
//! ])
//! .unwrap();
//!
//! let engine = Engine::new(
//!     Arc::new(catalog),
//!     ClassifierConfig::default(),
//!     SuggestConfig::default(),
//!     None,
//! )
//! .unwrap();
//!
//! let suggestions = engine.suggest_text("app", 5).unwrap();
//! assert_eq!(suggestions[0].name, "Apple");
//! ```
//!
//! ## Crate Structure
//!
//! - `aisle-core` - Vectors, categories, the catalog and top-k search
//! - `aisle-classify` - Classifier, autocomplete ranking, lexical fallback, engine
//! - `aisle-api` - REST API and HTTP text encoder

// Re-export core types
pub use aisle_core::{
    find_nearest, Catalog, CatalogEntry, CatalogRecord, Category, Error, Neighbor, Result,
    TextEncoder, Vector,
};

// Re-export decision layer
pub use aisle_classify::{
    classify_by_prefix, AutocompleteRanker, ClassificationResult, Classifier, ClassifierConfig,
    ConfidencePolicy, Engine, SuggestConfig, Suggestion,
};

// Re-export API
pub use aisle_api::{HttpEncoder, RestApi, ServiceState};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AutocompleteRanker, Catalog, CatalogEntry, Category, ClassificationResult, Classifier,
        ClassifierConfig, ConfidencePolicy, Engine, Error, Neighbor, Result, SuggestConfig,
        Suggestion, TextEncoder, Vector,
    };
}

/// SIMD-optimized vector operations
pub mod simd {
    pub use aisle_core::simd::{dot_product_simd, norm_simd};
}
