//! HEXCAT Core - Board, cat strategies and turn logic
//!
//! This crate provides the core game logic for HEXCAT:
//! - Board geometry (hex grid with axial coordinates, player blocks)
//! - Cat movement strategies (BFS and A*)
//! - Game state and the player/cat turn transition
//! - Persistence port and flat record serialization

pub mod board;
pub mod error;
pub mod game;
pub mod repository;
pub mod strategy;

// Re-exports for convenient access
pub use board::{BoardStats, Hex, HexBoard, DIRECTIONS};
pub use error::{GameError, MoveRejection};
pub use game::{GameRecord, GameState, GameStatus, NoopObserver, TurnObserver, TurnOutcome};
pub use repository::GameRepository;
pub use strategy::{AStarStrategy, BfsStrategy, CatStrategy, Difficulty, Pathfinder};
