use crate::config::GatewayConfig;
use crate::gateway::models::{PredictionRequest, PredictionResponse, RecipeListResponse};
use crate::{Error, Result};
use reqwest::{header, Client, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

/// Client for the remote ingredient prediction API
#[derive(Clone)]
pub struct PredictionGateway {
    client: Client,
    base_url: Url,
}

impl PredictionGateway {
    /// Create a new gateway client
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {e}")))?;

        // Trailing slash so `join` appends instead of replacing the last segment
        let mut base = config.base_url.trim_end_matches('/').to_string();
        base.push('/');
        let base_url = Url::parse(&base)?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The configured HTTP client, shared with other outbound fetches
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// GET /data/recipes - recipe names known to the prediction API
    pub async fn list_recipes(&self) -> Result<Vec<String>> {
        let url = self.endpoint("data/recipes")?;
        debug!("Prediction API request: GET {}", url);

        let response = self.client.get(url).send().await?;
        let listing: RecipeListResponse = Self::decode(response).await?;
        Ok(listing.recipes)
    }

    /// POST /ingredients/predict - ingredient matches and nutrition for a recipe
    pub async fn predict(&self, recipe_name: &str) -> Result<PredictionResponse> {
        let request = PredictionRequest::new(recipe_name);
        if request.recipe_name.is_empty() {
            return Err(Error::Validation(
                "Recipe name must not be empty".to_string(),
            ));
        }

        let url = self.endpoint("ingredients/predict")?;
        debug!(
            "Prediction API request: POST {} ({})",
            url, request.recipe_name
        );

        let response = self.client.post(url).json(&request).send().await?;
        Self::decode(response).await
    }

    /// Non-200 responses surface status and body verbatim; no retries
    async fn decode<T>(response: Response) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();

        if status != StatusCode::OK {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            error!("Prediction API error: {} - {}", status, body);

            return Err(Error::Gateway {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| Error::GatewayResponse(e.to_string()))
    }
}
