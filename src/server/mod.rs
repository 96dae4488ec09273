pub mod handlers;
pub mod types;

use crate::{
    Result,
    config::{Config, ServerConfig},
    gateway::Gateway,
    gemini::{GeminiClient, GenerativeClient},
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

pub fn router(state: AppState, config: &ServerConfig) -> Router {
    let app = Router::new()
        .route(
            "/api/analyze-size",
            post(handlers::analyze_size).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/generate-try-on",
            post(handlers::generate_try_on).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/analyze-style",
            post(handlers::analyze_style).fallback(handlers::method_not_allowed),
        )
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if config.cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

pub async fn run(config: Config) -> Result<()> {
    let client = GeminiClient::new(&config.gemini)?;
    if !client.has_credential() {
        warn!("GEMINI_API_KEY is not set; analysis endpoints will answer 500 until it is");
    }

    let gateway = Gateway::new(Arc::new(client), &config)?;

    let app_state = AppState {
        gateway: Arc::new(gateway),
    };

    let app = router(app_state, &config.server);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
