use craving::catalog::RecipeCatalog;
use craving::config::EmbeddingConfig;
use craving::embedding::SharedEncoder;
use craving::retrieval::RecipeRetriever;
use std::sync::Arc;
use std::time::Duration;

fn retriever() -> RecipeRetriever {
    let catalog = RecipeCatalog::new(["chicken soup", "apple pie", "green salad"]);
    RecipeRetriever::new(
        Arc::new(catalog),
        Arc::new(SharedEncoder::new(EmbeddingConfig::default())),
        Duration::from_secs(300),
    )
}

#[tokio::test]
#[ignore = "downloads the all-MiniLM-L6-v2 model"]
async fn test_light_and_fresh_prefers_salad() {
    let retriever = retriever();

    let result = retriever
        .resolve("I want something light and fresh")
        .await
        .expect("Resolution failed");

    assert_eq!(result.recipe_name, "green salad");
    assert!((-1.0..=1.0).contains(&result.score));
}

#[tokio::test]
#[ignore = "downloads the all-MiniLM-L6-v2 model"]
async fn test_sweet_craving_prefers_dessert() {
    let catalog = RecipeCatalog::new(["chicken soup", "sweet brownie", "spicy curry"]);
    let retriever = RecipeRetriever::new(
        Arc::new(catalog),
        Arc::new(SharedEncoder::new(EmbeddingConfig::default())),
        Duration::from_secs(300),
    );

    let result = retriever
        .resolve("something sweet and easy")
        .await
        .expect("Resolution failed");

    assert_eq!(result.recipe_name, "sweet brownie");
    assert!((-1.0..=1.0).contains(&result.score));
}
