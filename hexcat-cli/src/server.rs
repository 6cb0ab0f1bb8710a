//! Server command - start the HTTP API server
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: configure_server(), start_server()
//! - Level 3: (delegated to hexcat-server crate)
//! - Level 4: configuration validation

use anyhow::Result;
use clap::Args;

use hexcat_server::{run_server, ServerConfig, ServiceConfig};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ServerArgs {
    /// Port number to listen on
    #[arg(long, default_value = "8002", env = "HEXCAT_PORT")]
    pub port: u16,

    /// Interface to bind
    #[arg(long, default_value = "0.0.0.0", env = "HEXCAT_HOST")]
    pub host: String,

    /// Smallest board size clients may request
    #[arg(long, default_value = "3")]
    pub min_size: i32,

    /// Largest board size clients may request
    #[arg(long, default_value = "10")]
    pub max_size: i32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run server command
///
/// This function reads like a table of contents:
/// 1. Configure server
/// 2. Start server (blocking)
pub fn run(args: ServerArgs) -> Result<()> {
    let config = configure_server(&args)?;

    tracing::info!("Starting HEXCAT server on {}:{}", config.host, config.port);

    start_server(config)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Configure server from command arguments
fn configure_server(args: &ServerArgs) -> Result<ServerConfig> {
    validate_board_sizes(args.min_size, args.max_size)?;

    let service = ServiceConfig::default().with_board_sizes(args.min_size, args.max_size);
    let default_size = service
        .default_board_size
        .clamp(args.min_size, args.max_size);

    Ok(ServerConfig::default()
        .with_host(args.host.clone())
        .with_port(args.port)
        .with_service(service.with_default_board_size(default_size)))
}

/// Start the server (blocking)
fn start_server(config: ServerConfig) -> Result<()> {
    // Create tokio runtime for async server
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async { run_server(config).await })
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Validate the range of board sizes offered to clients
fn validate_board_sizes(min: i32, max: i32) -> Result<()> {
    if min < 1 {
        anyhow::bail!("Minimum board size must be at least 1, got {}", min);
    }
    if min > max {
        anyhow::bail!("Minimum board size {} exceeds maximum {}", min, max);
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn args(min_size: i32, max_size: i32) -> ServerArgs {
        ServerArgs {
            port: 9000,
            host: "127.0.0.1".to_string(),
            min_size,
            max_size,
        }
    }

    #[test]
    fn test_configure_server_defaults() {
        let config = configure_server(&args(3, 10)).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.service.min_board_size, 3);
        assert_eq!(config.service.max_board_size, 10);
        assert_eq!(config.service.default_board_size, 5);
    }

    #[test]
    fn test_default_size_follows_range() {
        let config = configure_server(&args(7, 9)).unwrap();
        assert_eq!(config.service.default_board_size, 7);
    }

    #[test]
    fn test_validate_board_sizes() {
        assert!(validate_board_sizes(3, 10).is_ok());
        assert!(validate_board_sizes(0, 10).is_err());
        assert!(validate_board_sizes(8, 4).is_err());
    }
}
