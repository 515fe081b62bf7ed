use clap::Parser;
use craving::{
    api::{create_router, AppState},
    cli::{commands, Cli, Commands},
    config::Settings,
    embedding::SharedEncoder,
    gateway::PredictionGateway,
    retrieval::RecipeRetriever,
    Error, Result,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,craving=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let settings = Settings::from_env()?;
    settings.validate()?;

    let gateway = PredictionGateway::new(&settings.gateway)?;

    match cli.command {
        Commands::Serve { port, host, warm } => {
            serve(settings, gateway, port, host, warm).await?;
        }
        Commands::Resolve { query } => {
            let retriever = build_retriever(&settings, &gateway).await?;
            commands::resolve(&retriever, &query).await?;
        }
        Commands::Analyze { query } => {
            let retriever = build_retriever(&settings, &gateway).await?;
            commands::analyze(&retriever, &gateway, &query).await?;
        }
        Commands::Predict { recipe } => {
            commands::predict(&gateway, &recipe).await?;
        }
        Commands::Recipes { limit } => {
            let catalog = settings.catalog.source.load(&gateway).await?;
            commands::list_recipes(&catalog, limit);
        }
        Commands::Export {
            recipe,
            format,
            output,
        } => {
            commands::export(&gateway, &recipe, format, output).await?;
        }
    }

    Ok(())
}

/// Load the catalog once; the encoder and index load lazily on first query
async fn build_retriever(settings: &Settings, gateway: &PredictionGateway) -> Result<RecipeRetriever> {
    let catalog = settings.catalog.source.load(gateway).await?;
    if catalog.is_empty() {
        warn!("Recipe catalog from {} is empty", settings.catalog.source);
    }

    Ok(RecipeRetriever::new(
        Arc::new(catalog),
        Arc::new(SharedEncoder::new(settings.embedding.clone())),
        settings.resolver.deadline(),
    ))
}

async fn serve(
    mut settings: Settings,
    gateway: PredictionGateway,
    port: Option<u16>,
    host: Option<String>,
    warm: bool,
) -> Result<()> {
    // Override settings with CLI arguments
    if let Some(port) = port {
        settings.server.port = port;
    }
    if let Some(host) = host {
        settings.server.host = host;
    }

    info!("Starting craving server");
    info!("Catalog source: {}", settings.catalog.source);
    info!("Prediction API: {}", gateway.base_url());
    info!(
        "Embedding backend: {:?} ({})",
        settings.embedding.backend, settings.embedding.model
    );

    let retriever = Arc::new(build_retriever(&settings, &gateway).await?);

    if warm {
        info!("Warming up embedding model and vector index");
        retriever.warm_up().await?;
    }

    let state = AppState {
        retriever,
        gateway,
        settings: settings.clone(),
    };

    let app = create_router(state, &settings);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    println!("\n========================================");
    println!("Craving Server");
    println!("========================================");
    println!("Address: http://{addr}");
    println!("\nAPI Endpoints:");
    println!("  GET  /api/recipes");
    println!("  POST /api/resolve");
    println!("  POST /api/predict");
    println!("  POST /api/analyze");
    println!("  GET  /api/export");
    println!("\nPress Ctrl+C to stop");
    println!("========================================\n");

    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Internal(format!("Server error: {e}")))?;

    info!("Shutting down...");
    Ok(())
}
