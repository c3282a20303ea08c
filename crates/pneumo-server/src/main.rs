use std::sync::Arc;

use anyhow::{Context, Result};
use pneumo_model::OnnxClassifier;
use pneumo_server::config::ServerConfig;
use pneumo_server::{router, ServerState};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .compact()
        .init();

    let config = ServerConfig::from_env().context("invalid server configuration")?;

    info!("Loading model from {}", config.model_path.display());
    let classifier = OnnxClassifier::load(&config.model_path)
        .inspect_err(|e| error!("Model failed to load, refusing to serve: {}", e))
        .with_context(|| format!("failed to load model from {}", config.model_path.display()))?;

    let state = Arc::new(ServerState::new(Arc::new(classifier)));
    let app = router(state, config.max_upload_bytes);

    let addr = config.bind_addr();
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
