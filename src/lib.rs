pub mod api;
pub mod config;
pub mod error;
pub mod logic;
pub mod model;
pub mod seed;
pub mod store;

// Export API types
pub use api::handlers;
pub use api::routes;

pub use error::ConsoleError;

// Export logic types
pub use logic::{
    filter_records, AdminDashboard, ConfirmationGate, FamilyImageStats, FormDraft, FormMode,
    ListFilterEvaluator, PublicStatus,
};

// Export all model types
pub use model::*;

// Export store types
pub use store::{EntityCollection, InMemoryStore, RecordStore, Store};

use axum::http::HeaderValue;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;

/// Router with state and the CORS layer the browser front-end needs
pub fn build_app<S: Store + 'static>(store: Arc<S>, config: &AppConfig) -> anyhow::Result<axum::Router> {
    let cors = match &config.console.allowed_origin {
        Some(origin) => CorsLayer::new().allow_origin(origin.parse::<HeaderValue>()?),
        None => CorsLayer::new().allow_origin(Any),
    }
    .allow_methods(Any)
    .allow_headers(Any);

    Ok(api::routes::create_router::<S>().with_state(store).layer(cors))
}

/// Store for a fresh process, seeded or empty depending on configuration
pub fn initial_store(config: &AppConfig) -> InMemoryStore {
    if config.console.load_seed_data {
        log::info!("Loading seed data");
        InMemoryStore::seeded()
    } else {
        InMemoryStore::new()
    }
}

/// Process bootstrap: `.env`, logger, layered config, store, then serve until shutdown
pub async fn run_server() -> anyhow::Result<()> {
    use axum::serve;
    use tokio::net::TcpListener;

    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    log::info!("Image Factory Console");

    let config = AppConfig::load()?;
    log::info!(
        "Configuration loaded: server={}:{}",
        config.server.host,
        config.server.port
    );

    let store = Arc::new(initial_store(&config));
    let app = build_app(store, &config)?;

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    log::info!("Console API running on http://{}", bind_address);
    log::info!("Route documentation available at http://{}/docs", bind_address);

    serve(listener, app).await?;

    Ok(())
}
