use craving::catalog::{CatalogSource, RecipeCatalog};
use craving::config::{EmbeddingBackend, EmbeddingConfig, GatewayConfig};
use craving::embedding::{Encoder, HashingEncoder, SharedEncoder};
use craving::gateway::PredictionGateway;
use craving::retrieval::{QueryResolver, RecipeRetriever, RecipeVectorIndex};
use craving::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

fn fixture_source() -> CatalogSource {
    CatalogSource::File(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/recipes.csv"))
}

fn offline_gateway() -> PredictionGateway {
    PredictionGateway::new(&GatewayConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        ..GatewayConfig::default()
    })
    .expect("Failed to create gateway client")
}

async fn hashing_retriever() -> RecipeRetriever {
    let catalog = fixture_source()
        .load(&offline_gateway())
        .await
        .expect("Failed to load fixture catalog");

    let encoder = SharedEncoder::new(EmbeddingConfig {
        backend: EmbeddingBackend::Hashing,
        ..EmbeddingConfig::default()
    });

    RecipeRetriever::new(Arc::new(catalog), Arc::new(encoder), Duration::from_secs(10))
}

#[tokio::test]
async fn test_fixture_catalog_drops_blank_rows_and_keeps_duplicates() {
    let catalog = fixture_source()
        .load(&offline_gateway())
        .await
        .expect("Failed to load fixture catalog");

    assert_eq!(
        catalog.names(),
        &[
            "chicken soup",
            "apple pie",
            "green salad",
            "sweet brownie",
            "spicy curry",
            "chicken soup",
        ]
    );
}

#[tokio::test]
async fn test_resolve_from_csv_catalog() {
    let retriever = hashing_retriever().await;

    let result = retriever
        .resolve("something sweet and easy")
        .await
        .expect("Resolution failed");
    assert_eq!(result.recipe_name, "sweet brownie");
    assert!((-1.0..=1.0).contains(&result.score));

    let result = retriever
        .resolve("something spicy tonight")
        .await
        .expect("Resolution failed");
    assert_eq!(result.recipe_name, "spicy curry");
}

#[tokio::test]
async fn test_duplicate_names_resolve_to_first_occurrence() {
    let retriever = hashing_retriever().await;

    let result = retriever
        .resolve("a bowl of chicken soup")
        .await
        .expect("Resolution failed");
    assert_eq!(result.recipe_name, "chicken soup");
    assert_eq!(result.position, 0);
}

#[tokio::test]
async fn test_no_shared_words_ties_at_zero_and_picks_first() {
    let retriever = hashing_retriever().await;

    let result = retriever.resolve("zzz qqq").await.expect("Resolution failed");
    assert_eq!(result.position, 0);
    assert_eq!(result.score, 0.0);
}

#[tokio::test]
async fn test_repeated_resolution_is_stable() {
    let retriever = hashing_retriever().await;

    let first = retriever.resolve("fresh green salad").await.unwrap();
    let second = retriever.resolve("fresh green salad").await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.recipe_name, "green salad");
}

#[tokio::test]
async fn test_empty_catalog_fails_for_any_query() {
    let retriever = RecipeRetriever::new(
        Arc::new(RecipeCatalog::default()),
        Arc::new(SharedEncoder::preloaded(Arc::new(HashingEncoder::default()))),
        Duration::from_secs(5),
    );

    for query in ["soup", "something sweet", "I want something light and fresh"] {
        assert!(matches!(
            retriever.resolve(query).await,
            Err(Error::EmptyCatalog)
        ));
    }
}

#[test]
fn test_index_alignment_and_batch_equivalence() {
    let encoder = HashingEncoder::default();
    let catalog = RecipeCatalog::new(["chicken soup", "apple pie", "green salad"]);
    let index = RecipeVectorIndex::build(&catalog, &encoder).unwrap();

    assert_eq!(index.len(), catalog.len());
    for (i, name) in catalog.iter().enumerate() {
        let single = encoder.encode(name).unwrap();
        assert_eq!(index.get(i).unwrap(), single.as_slice());
    }
}

#[test]
fn test_engineered_tie_returns_soup() {
    let catalog = RecipeCatalog::new(["Soup", "Stew"]);
    let index = RecipeVectorIndex::from_vectors(vec![vec![0.6, 0.8], vec![0.6, 0.8]]).unwrap();
    let encoder = HashingEncoder::new(2);

    let result = QueryResolver::new(&catalog, &index, &encoder)
        .resolve("hot bowl")
        .unwrap();
    assert_eq!(result.recipe_name, "Soup");
}

#[test]
fn test_zero_vector_entry_never_nan() {
    let catalog = RecipeCatalog::new(["Blank", "Other"]);
    let index = RecipeVectorIndex::from_vectors(vec![vec![0.0; 4], vec![0.0; 4]]).unwrap();
    let encoder = HashingEncoder::new(4);

    let result = QueryResolver::new(&catalog, &index, &encoder)
        .resolve("anything")
        .unwrap();
    assert_eq!(result.score, 0.0);
    assert_eq!(result.recipe_name, "Blank");
}
