use crate::catalog::RecipeCatalog;
use crate::embedding::SharedEncoder;
use crate::retrieval::index::RecipeVectorIndex;
use crate::retrieval::resolver::{QueryResolver, QueryResult};
use crate::{Error, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{info, warn};

/// Long-lived retrieval state: the catalog, the shared encoder and the
/// vector index built from them on first use.
///
/// Index construction happens-before every resolution and the index is never
/// mutated afterwards, so concurrent queries only read shared state. The build
/// runs in its own task; a caller whose deadline expires stops waiting but the
/// build carries on and later callers join it.
pub struct RecipeRetriever {
    catalog: Arc<RecipeCatalog>,
    encoder: Arc<SharedEncoder>,
    index: Arc<OnceCell<Arc<RecipeVectorIndex>>>,
    deadline: Duration,
}

impl RecipeRetriever {
    pub fn new(catalog: Arc<RecipeCatalog>, encoder: Arc<SharedEncoder>, deadline: Duration) -> Self {
        Self {
            catalog,
            encoder,
            index: Arc::new(OnceCell::new()),
            deadline,
        }
    }

    pub fn catalog(&self) -> &RecipeCatalog {
        &self.catalog
    }

    pub fn encoder(&self) -> &SharedEncoder {
        &self.encoder
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    pub fn is_index_built(&self) -> bool {
        self.index.initialized()
    }

    /// Load the model and build the index now rather than on the first query
    pub async fn warm_up(&self) -> Result<()> {
        tokio::time::timeout(self.deadline, self.index())
            .await
            .map_err(|_| Error::Timeout(self.deadline))??;
        Ok(())
    }

    /// Resolve with the default deadline
    pub async fn resolve(&self, query: &str) -> Result<QueryResult> {
        self.resolve_within(query, self.deadline).await
    }

    /// Resolve, failing with `Timeout` if model load, index build and scoring
    /// do not finish within `deadline`
    pub async fn resolve_within(&self, query: &str, deadline: Duration) -> Result<QueryResult> {
        match tokio::time::timeout(deadline, self.resolve_inner(query)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Resolution of '{}' exceeded {:?}", query, deadline);
                Err(Error::Timeout(deadline))
            }
        }
    }

    async fn resolve_inner(&self, query: &str) -> Result<QueryResult> {
        // No model load for a catalog that cannot produce a match
        if self.catalog.is_empty() {
            return Err(Error::EmptyCatalog);
        }

        let index = self.index().await?;
        let encoder = self.encoder.get().await?;
        let catalog = Arc::clone(&self.catalog);
        let query = query.to_string();

        tokio::task::spawn_blocking(move || {
            QueryResolver::new(&catalog, &index, encoder.as_ref()).resolve(&query)
        })
        .await
        .map_err(|e| Error::Internal(format!("Resolver task failed: {e}")))?
    }

    async fn index(&self) -> Result<Arc<RecipeVectorIndex>> {
        if let Some(index) = self.index.get() {
            return Ok(Arc::clone(index));
        }

        let cell = Arc::clone(&self.index);
        let encoder = Arc::clone(&self.encoder);
        let catalog = Arc::clone(&self.catalog);

        tokio::spawn(async move {
            let index = cell
                .get_or_try_init(|| async move {
                    let encoder = encoder.get().await?;
                    info!("Building vector index for {} recipes", catalog.len());

                    tokio::task::spawn_blocking(move || {
                        RecipeVectorIndex::build(&catalog, encoder.as_ref()).map(Arc::new)
                    })
                    .await
                    .map_err(|e| Error::Internal(format!("Index build task failed: {e}")))?
                })
                .await?;

            Ok::<_, Error>(Arc::clone(index))
        })
        .await
        .map_err(|e| Error::Internal(format!("Index build task failed: {e}")))?
    }
}
