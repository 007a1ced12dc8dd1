mod chunker;
mod completion;
mod config;
mod confidence;
mod errors;
mod metrics;
mod notify;
mod pdf;
mod routes;
mod services;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration
    dotenvy::dotenv().ok();
    let config = config::AppConfig::build()?;

    // 2. Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.server.rust_log))
        .init();

    tracing::info!("Starting DocQA-rs...");

    // 3. Install metrics recorder and exposition route
    let metrics_router = metrics::setup_metrics()?;

    // 4. Initialize app state
    let state = services::AppState::new(Arc::new(config.clone()));

    // 5. Setup router
    let app = routes::create_router(state, metrics_router);

    // 6. Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
