//! Text-level entry point
//!
//! Wraps the classifier and the ranker with the text encoder and owns the
//! recovery policy when the encoder is missing or fails.

use aisle_core::{Catalog, Error, Result, TextEncoder, Vector};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::autocomplete::{AutocompleteRanker, Suggestion};
use crate::classifier::{ClassificationResult, Classifier};
use crate::config::{ClassifierConfig, SuggestConfig};
use crate::fallback::classify_by_prefix;

/// Immutable bundle of catalog, policies and encoder. Safe to share across threads.
#[derive(Clone)]
pub struct Engine {
    catalog: Arc<Catalog>,
    classifier: Classifier,
    ranker: AutocompleteRanker,
    encoder: Option<Arc<dyn TextEncoder>>,
}

impl Engine {
    pub fn new(
        catalog: Arc<Catalog>,
        classifier: ClassifierConfig,
        suggest: SuggestConfig,
        encoder: Option<Arc<dyn TextEncoder>>,
    ) -> Result<Self> {
        classifier.validate()?;
        suggest.validate()?;
        Ok(Self {
            catalog,
            classifier: Classifier::new(classifier),
            ranker: AutocompleteRanker::new(suggest),
            encoder,
        })
    }

    /// Same policies and encoder over a different catalog
    #[must_use]
    pub fn with_catalog(&self, catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            ..self.clone()
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn ranker(&self) -> &AutocompleteRanker {
        &self.ranker
    }

    pub fn has_encoder(&self) -> bool {
        self.encoder.is_some()
    }

    pub fn encoder_ready(&self) -> bool {
        self.encoder.as_ref().map(|e| e.is_ready()).unwrap_or(false)
    }

    /// Embed `text`, treating any encoder failure as "no vector"
    fn embed(&self, text: &str) -> Option<Vector> {
        let encoder = self.encoder.as_ref()?;
        match encoder.encode(text) {
            Ok(vector) => Some(vector.normalized()),
            Err(Error::EncoderUnavailable(reason)) => {
                warn!("Encoder unavailable, falling back to lexical matching: {}", reason);
                None
            }
            Err(e) => {
                warn!("Encoder failed, falling back to lexical matching: {}", e);
                None
            }
        }
    }

    /// Classify free text.
    ///
    /// Blank text yields `Other` with confidence 0. Without a usable
    /// embedding the prefix-count fallback decides instead.
    pub fn classify_text(&self, text: &str) -> Result<ClassificationResult> {
        let text = text.trim();
        if text.is_empty() || self.catalog.is_empty() {
            return Ok(ClassificationResult::other());
        }

        match self.embed(text) {
            Some(vector) => self.classifier.classify(Some(&vector), &self.catalog),
            None => {
                debug!("Lexical fallback classification for '{}'", text);
                Ok(classify_by_prefix(text, &self.catalog))
            }
        }
    }

    /// Suggestions for partially typed text, at most `limit`
    pub fn suggest_text(&self, text: &str, limit: usize) -> Result<Vec<Suggestion>> {
        let text = text.trim();
        if text.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let vector = if self.ranker.wants_embedding(text) {
            self.embed(text)
        } else {
            None
        };
        self.ranker.suggest(text, &self.catalog, limit, vector.as_ref())
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("catalog_size", &self.catalog.len())
            .field("classifier", self.classifier.config())
            .field("ranker", self.ranker.config())
            .field("encoder", &self.encoder.is_some())
            .finish()
    }
}
