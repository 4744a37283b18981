//! Stock Room Inventory - Backend Server

use stockroom_backend::{build_store, create_app, init_tracing, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    init_tracing(&config.logging);

    tracing::info!("Starting Stock Room Inventory Server");
    tracing::info!("Environment: {}", config.environment);

    let store = build_store(&config).await?;
    tracing::info!("Storage backend: {}", store.backend_name());

    let state = AppState { store };

    let app = create_app(state);

    let addr = config.bind_address();
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
