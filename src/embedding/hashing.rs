//! Feature-hashing encoder
//!
//! Maps each lowercase alphanumeric token to a signed bucket derived from its
//! SHA-256 digest, then L2-normalises. No model weights, fully deterministic.
//! Similarity reflects shared words only, so it is a development and test
//! backend rather than a semantic one.

use super::{EmbeddingVector, Encoder};
use crate::Result;
use sha2::{Digest, Sha256};

pub struct HashingEncoder {
    dimension: usize,
    model_name: String,
}

impl Default for HashingEncoder {
    fn default() -> Self {
        Self::new(super::DEFAULT_DIMENSION)
    }
}

impl HashingEncoder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
            model_name: format!("hashing-{}", dimension.max(1)),
        }
    }

    fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
    }

    fn embed(&self, text: &str) -> EmbeddingVector {
        let mut vector = vec![0.0_f32; self.dimension];

        for token in Self::tokens(text) {
            let digest = Sha256::digest(token.as_bytes());
            let mut bucket_bytes = [0u8; 8];
            bucket_bytes.copy_from_slice(&digest[..8]);
            let bucket = (u64::from_le_bytes(bucket_bytes) % self.dimension as u64) as usize;
            let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut vector {
                *x /= norm;
            }
        }

        vector
    }
}

impl Encoder for HashingEncoder {
    fn encode_many(&self, texts: &[String]) -> Result<Vec<EmbeddingVector>> {
        Ok(texts.iter().map(|text| self.embed(text)).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
