// Semantic recipe retrieval
// Catalog names are embedded once into a vector index; queries resolve to the
// single most similar name by cosine similarity.

pub mod index;
pub mod resolver;
pub mod service;

// Re-exports
pub use index::RecipeVectorIndex;
pub use resolver::{best_match, cosine_similarity, QueryResolver, QueryResult};
pub use service::RecipeRetriever;
