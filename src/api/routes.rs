use axum::http::{header, HeaderValue, Method};
use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer,
    set_header::SetResponseHeaderLayer, trace::TraceLayer,
};

use crate::api::handlers::{self, AppState};
use crate::config::Settings;

/// Create the router with all endpoints
pub fn create_router(state: AppState, settings: &Settings) -> Router {
    let api_routes = Router::new()
        .route("/recipes", get(handlers::list_recipes))
        .route("/resolve", post(handlers::resolve))
        .route("/predict", post(handlers::predict))
        .route("/analyze", post(handlers::analyze))
        .route("/export", get(handlers::export_matches))
        .with_state(state.clone());

    let health_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .with_state(state);

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            // Request body size limit - queries are short
            RequestBodyLimitLayer::new(settings.server.max_request_body_size),
        )
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .allow_origin(tower_http::cors::Any)
                .max_age(Duration::from_secs(3600)),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}
