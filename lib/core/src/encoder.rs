use crate::{Result, Vector};

/// Turns free text into an embedding vector.
///
/// Implementations report any failure as [`crate::Error::EncoderUnavailable`];
/// callers degrade to lexical matching rather than surfacing it.
pub trait TextEncoder: Send + Sync {
    fn encode(&self, text: &str) -> Result<Vector>;

    /// Whether the encoder is ready to serve requests
    fn is_ready(&self) -> bool {
        true
    }
}
