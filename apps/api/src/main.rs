mod config;
mod errors;
mod interview;
mod routes;
mod session;
mod state;
mod synthesis;
mod upstream;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::session::store::SessionStore;
use crate::state::AppState;
use crate::synthesis::synthesizer::{LocalSynthesizer, RemoteSynthesizer, Synthesizer};
use crate::upstream::UpstreamClient;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting interview API v{}", env!("CARGO_PKG_VERSION"));

    // Session store — the only shared mutable structure
    let store = Arc::new(SessionStore::new(config.question_seed));

    // Synthesizer backend (LocalSynthesizer by default — swap via ENABLE_REMOTE_SYNTHESIS)
    let synthesizer: Arc<dyn Synthesizer> = if config.enable_remote_synthesis {
        let url = config
            .upstream_url
            .clone()
            .context("UPSTREAM_URL is required when ENABLE_REMOTE_SYNTHESIS is set")?;
        let api_key = config.upstream_api_key.clone().unwrap_or_default();
        info!("Remote synthesis enabled (endpoint: {url})");
        Arc::new(RemoteSynthesizer(UpstreamClient::new(url, api_key)))
    } else {
        Arc::new(LocalSynthesizer)
    };

    let state = AppState {
        store,
        synthesizer,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
