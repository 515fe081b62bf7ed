use crate::gateway::{ExportFormat, IngredientMatch, MatchSummary};
use serde::{Deserialize, Serialize};

/// Recipe listing response, same shape as the prediction API's listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipesResponse {
    pub recipes: Vec<String>,
}

/// POST /api/resolve and /api/analyze body
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

/// POST /api/predict body
#[derive(Debug, Clone, Deserialize)]
pub struct PredictRequest {
    pub recipe_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveResponse {
    pub query: String,
    pub recipe_name: String,
    pub score: f32,
    pub position: usize,
}

/// Gateway result for a recipe plus derived metrics.
/// `summary` is absent when the prediction has no matches.
#[derive(Debug, Clone, Serialize)]
pub struct PredictResponse {
    pub recipe_name: String,
    pub ingredients: Vec<String>,
    pub matches: Vec<IngredientMatch>,
    pub summary: Option<MatchSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    pub query: String,
    pub recipe_name: String,
    pub score: f32,
    pub ingredients: Vec<String>,
    pub matches: Vec<IngredientMatch>,
    pub summary: Option<MatchSummary>,
}

/// GET /api/export query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct ExportParams {
    pub recipe_name: String,
    #[serde(default)]
    pub format: ExportFormat,
}

/// GET /api/recipes query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeListParams {
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Readiness check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub model: String,
    pub index: String,
    pub catalog_size: usize,
}
