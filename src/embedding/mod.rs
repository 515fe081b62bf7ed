//! Text embedding
//!
//! An [`Encoder`] turns text into fixed-length dense vectors. Two backends
//! exist: [`FastEmbedEncoder`] runs a local ONNX sentence-embedding model and
//! [`HashingEncoder`] is a deterministic offline fallback. [`SharedEncoder`]
//! is the process-wide handle that loads the configured backend once.

pub mod fastembed;
pub mod hashing;
pub mod shared;

use crate::config::{EmbeddingBackend, EmbeddingConfig};
use crate::Result;
use std::sync::Arc;

pub use self::fastembed::FastEmbedEncoder;
pub use hashing::HashingEncoder;
pub use shared::SharedEncoder;

/// Model used by default, 384 dimensions
pub const DEFAULT_MODEL: &str = "all-MiniLM-L6-v2";
pub const DEFAULT_DIMENSION: usize = 384;

/// A dense embedding vector
pub type EmbeddingVector = Vec<f32>;

/// Trait for text embedding models
///
/// Implementations must be deterministic for a fixed model and safe to call
/// from several threads at once.
pub trait Encoder: Send + Sync {
    /// Encode many texts, one vector per input, in input order
    fn encode_many(&self, texts: &[String]) -> Result<Vec<EmbeddingVector>>;

    /// Encode a single text
    fn encode(&self, text: &str) -> Result<EmbeddingVector> {
        self.encode_many(&[text.to_string()])?
            .into_iter()
            .next()
            .ok_or_else(|| {
                crate::Error::ModelUnavailable(format!(
                    "{} returned no embedding",
                    self.model_name()
                ))
            })
    }

    /// Embedding dimensionality
    fn dimension(&self) -> usize;

    /// Model identifier
    fn model_name(&self) -> &str;
}

/// Load the encoder described by `config`. Blocking: fastembed may download
/// and initialise model weights here.
pub fn load_encoder(config: &EmbeddingConfig) -> Result<Arc<dyn Encoder>> {
    match config.backend {
        EmbeddingBackend::FastEmbed => {
            let encoder = FastEmbedEncoder::load(&config.model, config.cache_dir.clone())?;
            Ok(Arc::new(encoder))
        }
        EmbeddingBackend::Hashing => Ok(Arc::new(HashingEncoder::new(config.dimension))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_hashing_encoder() {
        let config = EmbeddingConfig {
            backend: EmbeddingBackend::Hashing,
            dimension: 64,
            ..EmbeddingConfig::default()
        };

        let encoder = load_encoder(&config).unwrap();
        assert_eq!(encoder.dimension(), 64);
        assert_eq!(encoder.encode("tomato soup").unwrap().len(), 64);
    }

    #[test]
    fn test_load_unknown_model_is_model_unavailable() {
        let config = EmbeddingConfig {
            backend: EmbeddingBackend::FastEmbed,
            model: "definitely-not-a-model".to_string(),
            ..EmbeddingConfig::default()
        };

        assert!(matches!(
            load_encoder(&config),
            Err(crate::Error::ModelUnavailable(_))
        ));
    }
}
