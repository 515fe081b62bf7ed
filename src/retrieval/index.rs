use crate::catalog::RecipeCatalog;
use crate::embedding::{EmbeddingVector, Encoder};
use crate::{Error, Result};
use std::time::Instant;
use tracing::info;

/// Embeddings for every catalog entry, position `i` belonging to `catalog[i]`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeVectorIndex {
    vectors: Vec<EmbeddingVector>,
    dimension: usize,
}

impl RecipeVectorIndex {
    /// Encode the whole catalog in one batch. Either every entry is encoded
    /// or no index is produced.
    pub fn build(catalog: &RecipeCatalog, encoder: &dyn Encoder) -> Result<Self> {
        if catalog.is_empty() {
            return Ok(Self::default());
        }

        let started = Instant::now();
        let vectors = encoder.encode_many(catalog.names())?;

        if vectors.len() != catalog.len() {
            return Err(Error::IndexCatalogMismatch {
                index: vectors.len(),
                catalog: catalog.len(),
            });
        }

        let index = Self::from_vectors(vectors)?;

        info!(
            "Built vector index: {} recipes x {} dimensions with {} in {:?}",
            index.len(),
            index.dimension(),
            encoder.model_name(),
            started.elapsed()
        );

        Ok(index)
    }

    /// Wrap precomputed vectors; all must share one dimension
    pub fn from_vectors(vectors: Vec<EmbeddingVector>) -> Result<Self> {
        let dimension = vectors.first().map(Vec::len).unwrap_or(0);

        if let Some((position, v)) = vectors
            .iter()
            .enumerate()
            .find(|(_, v)| v.len() != dimension)
        {
            return Err(Error::ModelUnavailable(format!(
                "Embedding at position {position} has {} dimensions, expected {dimension}",
                v.len()
            )));
        }

        Ok(Self { vectors, dimension })
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn get(&self, position: usize) -> Option<&[f32]> {
        self.vectors.get(position).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[f32]> {
        self.vectors.iter().map(Vec::as_slice)
    }
}
