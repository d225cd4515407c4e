//! # aisle API
//!
//! HTTP surface for the aisle classifier:
//!
//! - [`RestApi`] - actix-web server exposing classification, suggestions,
//!   health and catalog reload
//! - [`HttpEncoder`] - [`aisle_core::TextEncoder`] backed by a remote
//!   embedding service
//! - [`ServiceState`] - shared engine handle with atomic catalog swaps

pub mod encoder;
pub mod rest;
pub mod state;

pub use encoder::HttpEncoder;
pub use rest::{configure, RestApi};
pub use state::ServiceState;
