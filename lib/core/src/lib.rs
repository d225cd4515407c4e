//! # aisle Core
//!
//! Core library for the aisle item classifier.
//!
//! This crate provides the data structures the decision engine runs on:
//!
//! - [`Vector`] - Dense embedding vector with SIMD dot product
//! - [`Category`] - The closed set of catalog categories
//! - [`Catalog`] - Immutable, shared table of reference entries
//! - [`find_nearest`] - Exact top-k similarity search over a catalog
//! - [`TextEncoder`] - Seam for the external text-to-vector model
//!
//! ## Example
//!
//! ```rust
//! use aisle_core::{Catalog, CatalogEntry, Category, Vector};
//!
//! let catalog = Catalog::load(vec![
//!     CatalogEntry::new("apple", Vector::new(vec![1.0, 0.0]), Category::Produce),
//!     CatalogEntry::new("milk", Vector::new(vec![0.0, 1.0]), Category::Dairy),
//! ])
//! .unwrap();
//!
//! let query = Vector::new(vec![0.8, 0.6]);
//! let neighbors = catalog.search(&query, 1).unwrap();
//! assert_eq!(neighbors[0].entry.name, "apple");
//! ```

pub mod catalog;
pub mod category;
pub mod encoder;
pub mod error;
pub mod search;
pub mod vector;

/// SIMD-optimized dot product
///
/// - AVX2/FMA on x86_64
/// - NEON on ARM64/Apple Silicon
pub mod simd;

pub use catalog::{Catalog, CatalogEntry, CatalogRecord};
pub use category::Category;
pub use encoder::TextEncoder;
pub use error::{Error, Result};
pub use search::{find_nearest, Neighbor};
pub use vector::Vector;
