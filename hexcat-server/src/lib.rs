//! HEXCAT Server - HTTP API for the game
//!
//! This crate provides the web backend:
//! - Game orchestration over a pluggable repository
//! - In-memory game store
//! - REST API for creating and playing games
//! - Leaderboard and statistics

mod routes;
mod service;
mod state;
mod store;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub use service::{
    GameAnalysis, GameService, GameView, LeaderboardEntry, PlayerStatistics, ServiceConfig,
};
pub use state::ServerState;
pub use store::MemoryRepository;

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub service: ServiceConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8002,
            service: ServiceConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_service(mut self, service: ServiceConfig) -> Self {
        self.service = service;
        self
    }
}

/// Create the router with all routes
pub fn create_router(state: Arc<ServerState>) -> Router {
    Router::new()
        // Status endpoint
        .route("/api/status", get(routes::status::status_handler))
        // Board geometry
        .route("/api/board", get(routes::board::get_board))
        // Game API
        .route("/api/games", post(routes::game::create_game))
        .route("/api/games/:id", get(routes::game::get_game))
        .route("/api/games/:id/moves", post(routes::game::make_move))
        .route("/api/games/:id/valid-move", get(routes::game::check_move))
        .route("/api/games/:id/abort", post(routes::game::abort_game))
        .route("/api/games/:id/analysis", get(routes::game::analyze_game))
        .route("/api/games/:id/suggestion", get(routes::game::suggest_move))
        // Aggregates
        .route("/api/leaderboard", get(routes::stats::get_leaderboard))
        .route("/api/statistics", get(routes::stats::get_statistics))
        // Shared state
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.host, config.port))?;
    let state = Arc::new(ServerState::new(config.service.clone()));
    let router = create_router(state);

    tracing::info!("HEXCAT Server starting on http://{}", addr);
    tracing::info!(
        "Board sizes {}..={}",
        config.service.min_board_size,
        config.service.max_board_size
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, router).await?;

    Ok(())
}
