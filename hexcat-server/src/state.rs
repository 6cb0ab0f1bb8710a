//! Shared server state

use crate::service::{GameService, ServiceConfig};
use crate::store::MemoryRepository;

/// State shared by all request handlers
pub struct ServerState {
    pub games: GameService<MemoryRepository>,
}

impl ServerState {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            games: GameService::new(MemoryRepository::new(), config),
        }
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new(ServiceConfig::default())
    }
}
