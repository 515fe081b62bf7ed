//! Prediction API boundary
//!
//! The remote service that turns a recipe name into ingredient matches and
//! nutrition. Its JSON is decoded into typed records here; nothing untyped
//! passes further in.

pub mod client;
pub mod export;
pub mod models;
pub mod summary;

pub use client::PredictionGateway;
pub use export::ExportFormat;
pub use models::{IngredientMatch, PredictionRequest, PredictionResponse};
pub use summary::MatchSummary;
