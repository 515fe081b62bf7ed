//! FastEmbed local embedding encoder
//!
//! Runs a sentence-embedding model locally through ONNX Runtime. Weights are
//! downloaded to the cache directory on first load.

use super::{EmbeddingVector, Encoder};
use crate::{Error, Result};
use ::fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;
use tracing::{debug, info};

/// FastEmbed-based sentence encoder
pub struct FastEmbedEncoder {
    // fastembed needs exclusive access for a forward pass
    model: Mutex<TextEmbedding>,
    model_name: String,
    dimension: usize,
}

/// Map a configured model name onto a fastembed model and its dimension
pub fn resolve_model(name: &str) -> Result<(EmbeddingModel, usize)> {
    let normalized = name
        .trim()
        .trim_start_matches("sentence-transformers/")
        .trim_start_matches("Qdrant/")
        .trim_start_matches("BAAI/")
        .to_lowercase();

    match normalized.as_str() {
        "all-minilm-l6-v2" => Ok((EmbeddingModel::AllMiniLML6V2, 384)),
        "all-minilm-l12-v2" => Ok((EmbeddingModel::AllMiniLML12V2, 384)),
        "paraphrase-multilingual-minilm-l12-v2" => {
            Ok((EmbeddingModel::ParaphraseMLMiniLML12V2, 384))
        }
        "bge-small-en-v1.5" => Ok((EmbeddingModel::BGESmallENV15, 384)),
        "bge-base-en-v1.5" => Ok((EmbeddingModel::BGEBaseENV15, 768)),
        "nomic-embed-text-v1.5" => Ok((EmbeddingModel::NomicEmbedTextV15, 768)),
        _ => Err(Error::ModelUnavailable(format!(
            "Unsupported embedding model: {name}"
        ))),
    }
}

impl FastEmbedEncoder {
    /// Load a model by name
    pub fn load(model_name: &str, cache_dir: Option<PathBuf>) -> Result<Self> {
        let (model, dimension) = resolve_model(model_name)?;

        let mut init_options = InitOptions::new(model).with_show_download_progress(false);
        if let Some(dir) = cache_dir {
            init_options = init_options.with_cache_dir(dir);
        }

        info!("Loading embedding model {}", model_name);
        let started = Instant::now();

        let text_embedding = TextEmbedding::try_new(init_options).map_err(|e| {
            Error::ModelUnavailable(format!("Failed to initialize {model_name}: {e}"))
        })?;

        info!(
            "Embedding model {} loaded in {:?} ({} dimensions)",
            model_name,
            started.elapsed(),
            dimension
        );

        Ok(Self {
            model: Mutex::new(text_embedding),
            model_name: model_name.to_string(),
            dimension,
        })
    }
}

impl Encoder for FastEmbedEncoder {
    fn encode_many(&self, texts: &[String]) -> Result<Vec<EmbeddingVector>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let text_refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        debug!("Encoding {} texts with {}", text_refs.len(), self.model_name);

        let mut model = self
            .model
            .lock()
            .map_err(|_| Error::ModelUnavailable("Embedding model lock poisoned".to_string()))?;

        let embeddings = model
            .embed(text_refs, None)
            .map_err(|e| Error::ModelUnavailable(format!("Embedding failed: {e}")))?;

        if embeddings.len() != texts.len() {
            return Err(Error::ModelUnavailable(format!(
                "Model returned {} embeddings for {} texts",
                embeddings.len(),
                texts.len()
            )));
        }

        Ok(embeddings)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
