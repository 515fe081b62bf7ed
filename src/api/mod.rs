// HTTP API: catalog listing, craving resolution and the prediction passthrough

pub mod handlers;
pub mod models;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
