use crate::catalog::RecipeCatalog;
use crate::embedding::Encoder;
use crate::retrieval::index::RecipeVectorIndex;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// The catalog entry closest to a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub recipe_name: String,
    /// Cosine similarity in [-1, 1]
    pub score: f32,
    pub position: usize,
}

/// Cosine similarity of two vectors.
///
/// Returns 0 when either vector has zero magnitude, when the lengths differ
/// or when the result is not finite. Otherwise clamped to [-1, 1].
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let mut dot = 0.0_f32;
    let mut norm_a = 0.0_f32;
    let mut norm_b = 0.0_f32;

    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let similarity = dot / (norm_a.sqrt() * norm_b.sqrt());
    if similarity.is_finite() {
        similarity.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Position and score of the best-scoring vector. Ties keep the earliest
/// position: the incumbent is only replaced by a strictly greater score.
pub fn best_match(query: &[f32], index: &RecipeVectorIndex) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;

    for (position, vector) in index.iter().enumerate() {
        let score = cosine_similarity(query, vector);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((position, score)),
        }
    }

    best
}

/// Resolves free-text queries against a catalog and its index. Borrows
/// everything read-only; holds no state of its own.
pub struct QueryResolver<'a> {
    catalog: &'a RecipeCatalog,
    index: &'a RecipeVectorIndex,
    encoder: &'a dyn Encoder,
}

impl<'a> QueryResolver<'a> {
    pub fn new(
        catalog: &'a RecipeCatalog,
        index: &'a RecipeVectorIndex,
        encoder: &'a dyn Encoder,
    ) -> Self {
        Self {
            catalog,
            index,
            encoder,
        }
    }

    pub fn resolve(&self, query: &str) -> Result<QueryResult> {
        if self.index.len() != self.catalog.len() {
            error!(
                "Vector index has {} entries but catalog has {}",
                self.index.len(),
                self.catalog.len()
            );
            return Err(Error::IndexCatalogMismatch {
                index: self.index.len(),
                catalog: self.catalog.len(),
            });
        }

        if self.catalog.is_empty() {
            return Err(Error::EmptyCatalog);
        }

        if query.trim().is_empty() {
            return Err(Error::Validation("Query must not be empty".to_string()));
        }

        let query_vector = self.encoder.encode(query)?;
        if query_vector.len() != self.index.dimension() {
            return Err(Error::ModelUnavailable(format!(
                "Query embedding has {} dimensions, index has {}",
                query_vector.len(),
                self.index.dimension()
            )));
        }

        let (position, score) = best_match(&query_vector, self.index).ok_or(Error::EmptyCatalog)?;
        let recipe_name = self
            .catalog
            .get(position)
            .ok_or_else(|| Error::IndexCatalogMismatch {
                index: self.index.len(),
                catalog: self.catalog.len(),
            })?
            .to_string();

        debug!(
            "Resolved '{}' to '{}' (position {}, score {:.4})",
            query, recipe_name, position, score
        );

        Ok(QueryResult {
            recipe_name,
            score,
            position,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::{EmbeddingVector, HashingEncoder};

    /// Always returns the same vector
    struct FixedEncoder(Vec<f32>);

    impl Encoder for FixedEncoder {
        fn encode_many(&self, texts: &[String]) -> Result<Vec<EmbeddingVector>> {
            Ok(texts.iter().map(|_| self.0.clone()).collect())
        }

        fn dimension(&self) -> usize {
            self.0.len()
        }

        fn model_name(&self) -> &str {
            "fixed"
        }
    }

    struct BrokenEncoder;

    impl Encoder for BrokenEncoder {
        fn encode_many(&self, _texts: &[String]) -> Result<Vec<EmbeddingVector>> {
            Err(Error::ModelUnavailable("no weights".to_string()))
        }

        fn dimension(&self) -> usize {
            2
        }

        fn model_name(&self) -> &str {
            "broken"
        }
    }

    fn index_of(vectors: Vec<Vec<f32>>) -> RecipeVectorIndex {
        RecipeVectorIndex::from_vectors(vectors).unwrap()
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 0.0], &[-2.0, 0.0]) + 1.0).abs() < 1e-6);
        assert!((cosine_similarity(&[3.0, 4.0], &[6.0, 8.0]) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_magnitude_is_exactly_zero() {
        let score = cosine_similarity(&[0.0, 0.0, 0.0], &[0.2, 0.5, 0.1]);
        assert_eq!(score, 0.0);
        assert!(!score.is_nan());
        assert_eq!(cosine_similarity(&[0.2, 0.5], &[0.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_mismatched_lengths_score_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
    }

    #[test]
    fn test_tie_returns_first_occurrence() {
        let catalog = RecipeCatalog::new(["Soup", "Stew"]);
        let index = index_of(vec![vec![1.0, 1.0], vec![1.0, 1.0]]);
        let encoder = FixedEncoder(vec![1.0, 0.0]);

        let result = QueryResolver::new(&catalog, &index, &encoder)
            .resolve("something warm")
            .unwrap();

        assert_eq!(result.recipe_name, "Soup");
        assert_eq!(result.position, 0);
    }

    #[test]
    fn test_picks_strict_maximum() {
        let catalog = RecipeCatalog::new(["a", "b", "c"]);
        let index = index_of(vec![vec![0.0, 1.0], vec![1.0, 0.1], vec![1.0, 0.5]]);
        let encoder = FixedEncoder(vec![1.0, 0.0]);

        let result = QueryResolver::new(&catalog, &index, &encoder)
            .resolve("query")
            .unwrap();
        assert_eq!(result.recipe_name, "b");
        assert!(result.score > cosine_similarity(&[1.0, 0.0], &[1.0, 0.5]));
    }

    #[test]
    fn test_zero_vector_entry_scores_zero() {
        let catalog = RecipeCatalog::new(["empty", "opposite"]);
        let index = index_of(vec![vec![0.0, 0.0], vec![-1.0, 0.0]]);
        let encoder = FixedEncoder(vec![1.0, 0.0]);

        let result = QueryResolver::new(&catalog, &index, &encoder)
            .resolve("query")
            .unwrap();

        // Zero vector scores 0, which beats -1
        assert_eq!(result.recipe_name, "empty");
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_all_negative_scores_still_resolve() {
        let catalog = RecipeCatalog::new(["x"]);
        let index = index_of(vec![vec![-1.0, 0.0]]);
        let encoder = FixedEncoder(vec![1.0, 0.0]);

        let result = QueryResolver::new(&catalog, &index, &encoder)
            .resolve("query")
            .unwrap();
        assert_eq!(result.recipe_name, "x");
        assert!((result.score + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = RecipeCatalog::default();
        let index = RecipeVectorIndex::default();
        let encoder = HashingEncoder::default();

        let err = QueryResolver::new(&catalog, &index, &encoder)
            .resolve("soup")
            .unwrap_err();
        assert!(matches!(err, Error::EmptyCatalog));
    }

    #[test]
    fn test_length_mismatch() {
        let catalog = RecipeCatalog::new(["Soup", "Stew"]);
        let index = index_of(vec![vec![1.0, 0.0]]);
        let encoder = FixedEncoder(vec![1.0, 0.0]);

        let err = QueryResolver::new(&catalog, &index, &encoder)
            .resolve("soup")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::IndexCatalogMismatch {
                index: 1,
                catalog: 2
            }
        ));
    }

    #[test]
    fn test_blank_query_rejected() {
        let catalog = RecipeCatalog::new(["Soup"]);
        let index = index_of(vec![vec![1.0, 0.0]]);
        let encoder = FixedEncoder(vec![1.0, 0.0]);

        let err = QueryResolver::new(&catalog, &index, &encoder)
            .resolve("   ")
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_encoder_failure_propagates() {
        let catalog = RecipeCatalog::new(["Soup"]);
        let index = index_of(vec![vec![1.0, 0.0]]);

        let err = QueryResolver::new(&catalog, &index, &BrokenEncoder)
            .resolve("soup")
            .unwrap_err();
        assert!(matches!(err, Error::ModelUnavailable(_)));
    }

    #[test]
    fn test_query_dimension_mismatch() {
        let catalog = RecipeCatalog::new(["Soup"]);
        let index = index_of(vec![vec![1.0, 0.0]]);
        let encoder = FixedEncoder(vec![1.0, 0.0, 0.0]);

        let err = QueryResolver::new(&catalog, &index, &encoder)
            .resolve("soup")
            .unwrap_err();
        assert!(matches!(err, Error::ModelUnavailable(_)));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let catalog = RecipeCatalog::new(["sweet brownie", "spicy curry"]);
        let encoder = HashingEncoder::default();
        let index = RecipeVectorIndex::build(&catalog, &encoder).unwrap();
        let resolver = QueryResolver::new(&catalog, &index, &encoder);

        let first = resolver.resolve("something sweet and easy").unwrap();
        let second = resolver.resolve("something sweet and easy").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.recipe_name, "sweet brownie");
        assert!((-1.0..=1.0).contains(&first.score));
    }
}
