use crate::catalog::CatalogSource;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_GATEWAY_URL: &str = "https://y-trust-003-51424904642.europe-west1.run.app";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub embedding: EmbeddingConfig,
    pub catalog: CatalogConfig,
    pub gateway: GatewayConfig,
    pub resolver: ResolverConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_request_body_size: usize,
}

/// Which encoder backs retrieval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    /// Local ONNX sentence-embedding model
    FastEmbed,
    /// Deterministic feature hashing, no model download
    Hashing,
}

impl std::str::FromStr for EmbeddingBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "fastembed" => Ok(Self::FastEmbed),
            "hashing" => Ok(Self::Hashing),
            other => Err(Error::Config(format!(
                "Unknown EMBEDDING_BACKEND '{other}' (expected 'fastembed' or 'hashing')"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    pub backend: EmbeddingBackend,
    pub model: String,
    pub cache_dir: Option<PathBuf>,
    /// Only used by the hashing backend
    pub dimension: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub source: CatalogSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    pub timeout_seconds: u64,
}

impl ResolverConfig {
    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            backend: EmbeddingBackend::FastEmbed,
            model: crate::embedding::DEFAULT_MODEL.to_string(),
            cache_dir: None,
            dimension: crate::embedding::DEFAULT_DIMENSION,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GATEWAY_URL.to_string(),
            timeout_seconds: 30,
            user_agent: format!("craving/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8501".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid PORT value".to_string()))?;

        let max_request_body_size = std::env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| "65536".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid MAX_REQUEST_BODY_SIZE value".to_string()))?;

        let backend = std::env::var("EMBEDDING_BACKEND")
            .unwrap_or_else(|_| "fastembed".to_string())
            .parse()?;

        let model = std::env::var("EMBEDDING_MODEL")
            .unwrap_or_else(|_| crate::embedding::DEFAULT_MODEL.to_string());

        let cache_dir = std::env::var("EMBEDDING_CACHE_DIR").ok().map(PathBuf::from);

        let dimension = std::env::var("EMBEDDING_DIMENSION")
            .unwrap_or_else(|_| crate::embedding::DEFAULT_DIMENSION.to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid EMBEDDING_DIMENSION value".to_string()))?;

        let source = std::env::var("CATALOG_SOURCE")
            .unwrap_or_else(|_| "data/recipes.csv".to_string())
            .parse()?;

        let base_url =
            std::env::var("GATEWAY_URL").unwrap_or_else(|_| DEFAULT_GATEWAY_URL.to_string());

        let gateway_timeout = std::env::var("GATEWAY_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid GATEWAY_TIMEOUT_SECS value".to_string()))?;

        let resolve_timeout = std::env::var("RESOLVE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid RESOLVE_TIMEOUT_SECS value".to_string()))?;

        Ok(Settings {
            server: ServerConfig {
                host,
                port,
                max_request_body_size,
            },
            embedding: EmbeddingConfig {
                backend,
                model,
                cache_dir,
                dimension,
            },
            catalog: CatalogConfig { source },
            gateway: GatewayConfig {
                base_url,
                timeout_seconds: gateway_timeout,
                ..GatewayConfig::default()
            },
            resolver: ResolverConfig {
                timeout_seconds: resolve_timeout,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("Port must be non-zero".to_string()));
        }

        if self.gateway.timeout_seconds == 0 {
            return Err(Error::Config(
                "Gateway timeout must be non-zero".to_string(),
            ));
        }

        if self.resolver.timeout_seconds == 0 {
            return Err(Error::Config(
                "Resolve timeout must be non-zero".to_string(),
            ));
        }

        if self.embedding.backend == EmbeddingBackend::Hashing && self.embedding.dimension == 0 {
            return Err(Error::Config(
                "Embedding dimension must be non-zero".to_string(),
            ));
        }

        url::Url::parse(&self.gateway.base_url)
            .map_err(|e| Error::Config(format!("Invalid GATEWAY_URL: {e}")))?;

        Ok(())
    }
}
