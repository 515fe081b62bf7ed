use super::RecipeCatalog;
use crate::gateway::PredictionGateway;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Where the recipe catalog comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "location", rename_all = "lowercase")]
pub enum CatalogSource {
    /// Local CSV file
    File(PathBuf),
    /// CSV document over HTTP(S)
    Url(String),
    /// The prediction API's recipe listing
    Gateway,
}

impl std::str::FromStr for CatalogSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::Config("CATALOG_SOURCE must not be empty".to_string()));
        }

        if s.eq_ignore_ascii_case("gateway") {
            Ok(Self::Gateway)
        } else if s.starts_with("http://") || s.starts_with("https://") {
            url::Url::parse(s)
                .map_err(|e| Error::Config(format!("Invalid CATALOG_SOURCE URL: {e}")))?;
            Ok(Self::Url(s.to_string()))
        } else {
            Ok(Self::File(PathBuf::from(s)))
        }
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
            Self::Gateway => write!(f, "gateway"),
        }
    }
}

impl CatalogSource {
    /// Load the catalog. Every failure is a `CatalogLoad` error.
    pub async fn load(&self, gateway: &PredictionGateway) -> Result<RecipeCatalog> {
        let started = Instant::now();

        let catalog = match self {
            Self::File(path) => {
                let bytes = tokio::fs::read(path).await.map_err(|e| {
                    Error::CatalogLoad(format!("Failed to read {}: {e}", path.display()))
                })?;
                RecipeCatalog::from_csv_reader(bytes.as_slice())?
            }
            Self::Url(url) => {
                let bytes = fetch_csv(gateway.http_client(), url).await?;
                RecipeCatalog::from_csv_reader(bytes.as_slice())?
            }
            Self::Gateway => {
                let names = gateway.list_recipes().await.map_err(|e| {
                    Error::CatalogLoad(format!("Failed to list recipes from gateway: {e}"))
                })?;
                RecipeCatalog::new(names)
            }
        };

        info!(
            "Loaded {} recipes from {} in {:?}",
            catalog.len(),
            self,
            started.elapsed()
        );

        Ok(catalog)
    }
}

/// Fetch with the gateway's client so the configured timeout and user agent apply
async fn fetch_csv(client: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT, "text/csv")
        .send()
        .await
        .map_err(|e| Error::CatalogLoad(format!("Failed to fetch {url}: {e}")))?;

    if !response.status().is_success() {
        return Err(Error::CatalogLoad(format!(
            "Fetching {url} returned HTTP {}",
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| Error::CatalogLoad(format!("Failed to read {url}: {e}")))?;

    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GatewayConfig;
    use std::io::Write;

    fn offline_gateway() -> PredictionGateway {
        PredictionGateway::new(&GatewayConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..GatewayConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_parse_source() {
        assert_eq!(
            "gateway".parse::<CatalogSource>().unwrap(),
            CatalogSource::Gateway
        );
        assert_eq!(
            "https://example.com/recipes.csv"
                .parse::<CatalogSource>()
                .unwrap(),
            CatalogSource::Url("https://example.com/recipes.csv".to_string())
        );
        assert_eq!(
            "data/recipes.csv".parse::<CatalogSource>().unwrap(),
            CatalogSource::File("data/recipes.csv".into())
        );
        assert!("".parse::<CatalogSource>().is_err());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name,minutes").unwrap();
        writeln!(file, "chicken soup,30").unwrap();
        writeln!(file, ",5").unwrap();
        writeln!(file, "apple pie,60").unwrap();

        let source = CatalogSource::File(file.path().to_path_buf());
        let catalog = source.load(&offline_gateway()).await.unwrap();
        assert_eq!(catalog.names(), &["chicken soup", "apple pie"]);
    }

    #[tokio::test]
    async fn test_missing_file_is_catalog_load_error() {
        let source = CatalogSource::File("/nonexistent/recipes.csv".into());
        let err = source.load(&offline_gateway()).await.unwrap_err();
        assert!(matches!(err, Error::CatalogLoad(_)));
    }

    #[tokio::test]
    async fn test_load_from_url() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/recipes.csv")
            .match_header("user-agent", mockito::Matcher::Regex("^craving/".to_string()))
            .match_header("accept", "text/csv")
            .with_status(200)
            .with_header("content-type", "text/csv")
            .with_body("name\nsweet brownie\nspicy curry\n")
            .create_async()
            .await;

        let source = CatalogSource::Url(format!("{}/recipes.csv", server.url()));
        let catalog = source.load(&offline_gateway()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(catalog.names(), &["sweet brownie", "spicy curry"]);
    }

    #[tokio::test]
    async fn test_url_not_found_is_catalog_load_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/recipes.csv")
            .with_status(404)
            .create_async()
            .await;

        let source = CatalogSource::Url(format!("{}/recipes.csv", server.url()));
        let err = source.load(&offline_gateway()).await.unwrap_err();
        assert!(matches!(err, Error::CatalogLoad(_)));
    }

    #[tokio::test]
    async fn test_load_from_gateway_listing() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/data/recipes")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"recipes": ["Soup", "", "Stew"]}"#)
            .create_async()
            .await;

        let gateway = PredictionGateway::new(&GatewayConfig {
            base_url: server.url(),
            ..GatewayConfig::default()
        })
        .unwrap();

        let catalog = CatalogSource::Gateway.load(&gateway).await.unwrap();
        assert_eq!(catalog.names(), &["Soup", "Stew"]);
    }
}
