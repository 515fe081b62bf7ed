use serde::{Deserialize, Serialize};

/// Body of `POST /ingredients/predict`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub recipe_name: String,
}

impl PredictionRequest {
    /// The prediction API expects trimmed, lowercased names
    pub fn new(recipe_name: &str) -> Self {
        Self {
            recipe_name: recipe_name.trim().to_lowercase(),
        }
    }
}

/// Successful prediction response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub ingredients: Vec<String>,
    pub matches: Vec<IngredientMatch>,
}

/// One recipe ingredient matched to a product, with nutrition per 100 g
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientMatch {
    pub searched_ingredient: String,
    pub matched_product: String,
    /// 0–100
    pub match_score: f64,
    #[serde(rename = "energy-kcal_100g")]
    pub energy_kcal_100g: f64,
    pub carbohydrates_100g: f64,
    pub proteins_100g: f64,
    pub fat_100g: f64,
}

/// Response of `GET /data/recipes`
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeListResponse {
    pub recipes: Vec<String>,
}
