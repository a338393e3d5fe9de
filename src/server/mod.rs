mod handlers;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::http::Method;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/voice-assistant",
            get(handlers::assistant_get).post(handlers::assistant_post),
        )
        .route(
            "/api/recipes",
            get(handlers::home).post(handlers::create_recipe),
        )
        .route("/api/recipes/:slug", get(handlers::recipe_detail))
        .route("/api/search", get(handlers::search))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Cookbook API listening on http://{}", addr);
    axum::serve(listener, router(state).into_make_service())
        .await
        .context("HTTP server exited unexpectedly")?;
    Ok(())
}
