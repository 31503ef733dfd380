mod config;
mod errors;
mod extraction;
mod knowledge_base;
mod models;
mod routes;
mod search;
mod state;
mod ui;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::knowledge_base::bedrock::init_client;
use crate::routes::build_router;
use crate::search::session::SearchSession;
use crate::state::AppState;

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

    info!("Starting Job Search v{}", env!("CARGO_PKG_VERSION"));

    // A client that cannot be built halts startup; no request is ever served.
    let knowledge_base = match init_client(&config).await {
        Ok(client) => client,
        Err(e) => {
            error!("Error connecting to AWS Bedrock: {e}");
            return Err(e).context("knowledge base client initialization failed");
        }
    };

    let state = AppState {
        session: SearchSession::new(Arc::new(knowledge_base)),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
