use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::{
    api::models::*,
    gateway::{export, MatchSummary, PredictionGateway},
    retrieval::RecipeRetriever,
    Result,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub retriever: Arc<RecipeRetriever>,
    pub gateway: PredictionGateway,
    pub settings: crate::config::Settings,
}

/// GET /api/recipes - List catalog recipe names
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(params): Query<RecipeListParams>,
) -> Result<Json<RecipesResponse>> {
    debug!("List recipes request: {:?}", params);

    let names = state.retriever.catalog().names();
    let limit = params.limit.unwrap_or(names.len()).min(names.len());

    Ok(Json(RecipesResponse {
        recipes: names[..limit].to_vec(),
    }))
}

/// POST /api/resolve - Map a craving to the closest recipe
pub async fn resolve(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<ResolveResponse>> {
    debug!("Resolve request: {:?}", request.query);

    let result = state.retriever.resolve(&request.query).await?;

    Ok(Json(ResolveResponse {
        query: request.query,
        recipe_name: result.recipe_name,
        score: result.score,
        position: result.position,
    }))
}

/// POST /api/predict - Ingredient matches for a known recipe name
pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>> {
    debug!("Predict request: {:?}", request.recipe_name);

    let prediction = state.gateway.predict(&request.recipe_name).await?;
    let summary = MatchSummary::from_response(&prediction);

    Ok(Json(PredictResponse {
        recipe_name: request.recipe_name,
        ingredients: prediction.ingredients,
        matches: prediction.matches,
        summary,
    }))
}

/// POST /api/analyze - Resolve a craving, then fetch its ingredient matches
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<AnalyzeResponse>> {
    debug!("Analyze request: {:?}", request.query);

    let resolved = state.retriever.resolve(&request.query).await?;
    let prediction = state.gateway.predict(&resolved.recipe_name).await?;
    let summary = MatchSummary::from_response(&prediction);

    Ok(Json(AnalyzeResponse {
        query: request.query,
        recipe_name: resolved.recipe_name,
        score: resolved.score,
        ingredients: prediction.ingredients,
        matches: prediction.matches,
        summary,
    }))
}

/// GET /api/export - Download matches as CSV or JSON
pub async fn export_matches(
    State(state): State<AppState>,
    Query(params): Query<ExportParams>,
) -> Result<impl IntoResponse> {
    debug!("Export request: {:?}", params);

    let prediction = state.gateway.predict(&params.recipe_name).await?;
    let body = export::render(&params.recipe_name, &prediction.matches, params.format)?;
    let file_name = export::export_file_name(&params.recipe_name, params.format);

    Ok((
        [
            (header::CONTENT_TYPE, params.format.mime_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    ))
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}

/// GET /ready - Readiness check endpoint
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<ReadinessResponse>> {
    let model_loaded = state.retriever.encoder().is_loaded();
    let index_built = state.retriever.is_index_built();
    let catalog_size = state.retriever.catalog().len();

    Ok(Json(ReadinessResponse {
        ready: model_loaded && catalog_size > 0,
        model: if model_loaded { "ok" } else { "loading" }.to_string(),
        index: if index_built { "ok" } else { "pending" }.to_string(),
        catalog_size,
    }))
}
