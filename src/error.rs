use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Embedding model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Catalog load error: {0}")]
    CatalogLoad(String),

    #[error("No recipe catalog available: the catalog has no entries")]
    EmptyCatalog,

    #[error("Index/catalog mismatch: index has {index} entries, catalog has {catalog}")]
    IndexCatalogMismatch { index: usize, catalog: usize },

    #[error("Resolution timed out after {0:?}")]
    Timeout(Duration),

    #[error("Prediction API error {status}: {body}")]
    Gateway { status: u16, body: String },

    #[error("Malformed prediction API response: {0}")]
    GatewayResponse(String),

    #[error("No matches found for '{0}'")]
    NoMatches(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get a sanitized error message safe for logging
    /// Filters out potentially sensitive information
    pub fn log_safe(&self) -> String {
        match self {
            // HTTP errors might contain internal URLs or authentication info
            Error::Http(_) => "External HTTP request failed".to_string(),

            // Internal errors might contain sensitive details
            Error::Internal(msg) => {
                let lower = msg.to_lowercase();
                if lower.contains("password")
                    || lower.contains("secret")
                    || lower.contains("token")
                    || lower.contains("key")
                {
                    "Internal error (details redacted)".to_string()
                } else {
                    format!("Internal error: {msg}")
                }
            }

            Error::InvalidUrl(_) => "Invalid URL provided".to_string(),
            Error::Io(_) => "File system operation failed".to_string(),
            Error::Json(_) => "JSON serialization failed".to_string(),

            // These errors are generally safe to log as-is
            _ => self.to_string(),
        }
    }
}

// Implement IntoResponse for API error handling
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            Error::IndexCatalogMismatch { .. } => {
                tracing::error!("Invariant violation: {}", self.log_safe());
            }
            _ => tracing::error!("Request error: {}", self.log_safe()),
        }

        let (status, body) = match &self {
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            Error::NoMatches(_) => (
                StatusCode::NOT_FOUND,
                json!({ "error": self.to_string() }),
            ),
            Error::EmptyCatalog => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({ "error": "No recipe catalog available" }),
            ),
            Error::ModelUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({ "error": "Embedding model unavailable" }),
            ),
            Error::Timeout(_) => (
                StatusCode::GATEWAY_TIMEOUT,
                json!({ "error": self.to_string() }),
            ),
            Error::Gateway { status, body } => (
                StatusCode::BAD_GATEWAY,
                json!({
                    "error": "Prediction API error",
                    "status": status,
                    "body": body,
                }),
            ),
            Error::GatewayResponse(msg) => (
                StatusCode::BAD_GATEWAY,
                json!({ "error": format!("Malformed prediction API response: {msg}") }),
            ),
            Error::Http(_) => (
                StatusCode::BAD_GATEWAY,
                json!({ "error": "External service error" }),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Internal server error" }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
