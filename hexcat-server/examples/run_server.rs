//! Example to run the HEXCAT server standalone
//!
//! Run with: cargo run -p hexcat-server --example run_server

use hexcat_server::{run_server, ServerConfig, ServiceConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = ServerConfig::default()
        .with_port(8002)
        .with_service(ServiceConfig::default().with_default_board_size(6));

    println!("Starting HEXCAT server on port {}", config.port);
    println!("Try: curl -X POST http://localhost:{}/api/games", config.port);

    run_server(config).await
}
