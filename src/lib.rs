pub mod config;
pub mod error;

// Retrieval core
pub mod catalog;
pub mod embedding;
pub mod retrieval;

// Prediction API boundary
pub mod gateway;

// Presentation
pub mod api;
pub mod cli;

// Utilities
pub mod utils;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
