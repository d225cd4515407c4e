//! HTTP client for an external embedding service
//!
//! Expects `POST {base}/api/embed` taking `{"text": ...}` and answering
//! `{"vector": [...], "dimension": n}`, plus `GET {base}/api/health`
//! answering `{"modelLoaded": bool}`.

use aisle_core::{Error, Result, TextEncoder, Vector};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Serialize)]
struct EmbedRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    vector: Vec<f32>,
    #[serde(default)]
    dimension: Option<usize>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    #[serde(default)]
    model_loaded: bool,
}

/// Blocking text encoder backed by a remote embedding service.
///
/// Build it outside any async runtime and call it from blocking contexts
/// only (e.g. inside `web::block`).
pub struct HttpEncoder {
    client: Client,
    embed_url: String,
    health_url: String,
}

impl HttpEncoder {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = base_url.trim_end_matches('/');
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::InvalidConfig(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            embed_url: format!("{}/api/embed", base),
            health_url: format!("{}/api/health", base),
        })
    }

    pub fn embed_url(&self) -> &str {
        &self.embed_url
    }
}

impl TextEncoder for HttpEncoder {
    fn encode(&self, text: &str) -> Result<Vector> {
        let response = self
            .client
            .post(&self.embed_url)
            .json(&EmbedRequest { text })
            .send()
            .map_err(|e| Error::EncoderUnavailable(format!("Embedding request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::EncoderUnavailable(format!(
                "Embedding request failed: HTTP {}",
                response.status()
            )));
        }

        let body: EmbedResponse = response
            .json()
            .map_err(|e| Error::EncoderUnavailable(format!("Invalid embedding response: {}", e)))?;

        if body.vector.is_empty() {
            return Err(Error::EncoderUnavailable(
                "Embedding service returned an empty vector".to_string(),
            ));
        }
        if let Some(dimension) = body.dimension {
            if dimension != body.vector.len() {
                return Err(Error::EncoderUnavailable(format!(
                    "Embedding response claims dimension {} but carries {} values",
                    dimension,
                    body.vector.len()
                )));
            }
        }

        debug!("Encoded '{}' into {} dimensions", text, body.vector.len());
        Ok(Vector::new(body.vector).normalized())
    }

    fn is_ready(&self) -> bool {
        self.client
            .get(&self.health_url)
            .send()
            .ok()
            .filter(|r| r.status().is_success())
            .and_then(|r| r.json::<HealthResponse>().ok())
            .map(|h| h.model_loaded)
            .unwrap_or(false)
    }
}
