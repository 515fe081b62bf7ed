use super::{load_encoder, Encoder};
use crate::config::EmbeddingConfig;
use crate::{Error, Result};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, warn};

type Loader = dyn Fn() -> Result<Arc<dyn Encoder>> + Send + Sync;

/// Process-wide encoder handle
///
/// The backend is loaded on first access, on the blocking pool. The load runs
/// in its own task, so a caller that stops waiting (a deadline, a dropped
/// request) does not cancel it; later callers join the same load. A failed
/// load leaves the cell empty so the next caller makes a fresh attempt.
pub struct SharedEncoder {
    label: String,
    loader: Arc<Loader>,
    cell: Arc<OnceCell<Arc<dyn Encoder>>>,
}

impl SharedEncoder {
    pub fn new(config: EmbeddingConfig) -> Self {
        let label = format!("{:?} ({})", config.backend, config.model);
        Self::with_loader(label, move || load_encoder(&config))
    }

    /// Use a custom blocking loader
    pub fn with_loader<F>(label: impl Into<String>, loader: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn Encoder>> + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            loader: Arc::new(loader),
            cell: Arc::new(OnceCell::new()),
        }
    }

    /// Wrap an already constructed encoder
    pub fn preloaded(encoder: Arc<dyn Encoder>) -> Self {
        let label = encoder.model_name().to_string();
        let loaded = Arc::clone(&encoder);
        Self {
            label,
            loader: Arc::new(move || -> Result<Arc<dyn Encoder>> { Ok(Arc::clone(&loaded)) }),
            cell: Arc::new(OnceCell::new_with(Some(encoder))),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// Get the encoder, loading it if this is the first access
    pub async fn get(&self) -> Result<Arc<dyn Encoder>> {
        if let Some(encoder) = self.cell.get() {
            return Ok(Arc::clone(encoder));
        }

        let cell = Arc::clone(&self.cell);
        let loader = Arc::clone(&self.loader);
        let label = self.label.clone();

        tokio::spawn(async move {
            let encoder = cell
                .get_or_try_init(|| async move {
                    info!("Initializing {} encoder", label);

                    let loaded = tokio::task::spawn_blocking(move || loader())
                        .await
                        .map_err(|e| {
                            Error::ModelUnavailable(format!("Model loader aborted: {e}"))
                        })?;

                    if let Err(e) = &loaded {
                        warn!("Encoder initialization failed: {}", e);
                    }
                    loaded
                })
                .await?;

            Ok::<_, Error>(Arc::clone(encoder))
        })
        .await
        .map_err(|e| Error::ModelUnavailable(format!("Model loader task failed: {e}")))?
    }
}
