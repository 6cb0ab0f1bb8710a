//! Cat movement strategies
//!
//! Both strategies answer the same four questions about a board:
//! - which neighbors the cat may step to
//! - which of those is the best next step
//! - whether any border cell is still reachable
//! - the full path to a given cell
//!
//! Searches are pure: they borrow the board read-only and keep all working
//! sets local to the call, so independent games can be searched in parallel.

mod astar;
mod bfs;

pub use astar::{border_heuristic, AStarStrategy};
pub use bfs::BfsStrategy;

use crate::board::{Hex, HexBoard};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Common contract of the cat's pathfinding strategies
pub trait Pathfinder {
    /// Cells the cat may step to from `pos`
    fn possible_moves(&self, board: &HexBoard, pos: Hex) -> Vec<Hex> {
        board.adjacent_open(pos)
    }

    /// Pick the best of `candidates`, or `None` if none of them leads anywhere.
    /// Ties go to the earliest candidate.
    fn select_best_move(
        &self,
        board: &HexBoard,
        candidates: &[Hex],
        current: Hex,
        target: Hex,
    ) -> Option<Hex>;

    /// Whether any border cell is reachable from `pos` through open cells
    fn has_path_to_goal(&self, board: &HexBoard, pos: Hex) -> bool;

    /// Path from `current` to `target`, both inclusive; empty if unreachable
    fn full_path(&self, board: &HexBoard, current: Hex, target: Hex) -> Vec<Hex>;

    /// Possible moves followed by best-move selection
    fn next_move(&self, board: &HexBoard, cat: Hex, target: Hex) -> Option<Hex> {
        let candidates = self.possible_moves(board, cat);
        self.select_best_move(board, &candidates, cat, target)
    }
}

/// Goal predicate shared by both strategies: the cat escapes from any border cell
pub fn is_escape_cell(board: &HexBoard, pos: Hex) -> bool {
    pos.distance_to_center() >= board.size()
}

/// Strategy selected for a game
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatStrategy {
    #[default]
    Bfs,
    AStar,
}

impl CatStrategy {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => CatStrategy::Bfs,
            Difficulty::Hard => CatStrategy::AStar,
        }
    }

    /// Difficulty tier this strategy is played at
    pub fn difficulty(self) -> Difficulty {
        match self {
            CatStrategy::Bfs => Difficulty::Easy,
            CatStrategy::AStar => Difficulty::Hard,
        }
    }
}

impl Pathfinder for CatStrategy {
    fn possible_moves(&self, board: &HexBoard, pos: Hex) -> Vec<Hex> {
        match self {
            CatStrategy::Bfs => BfsStrategy.possible_moves(board, pos),
            CatStrategy::AStar => AStarStrategy.possible_moves(board, pos),
        }
    }

    fn select_best_move(
        &self,
        board: &HexBoard,
        candidates: &[Hex],
        current: Hex,
        target: Hex,
    ) -> Option<Hex> {
        match self {
            CatStrategy::Bfs => BfsStrategy.select_best_move(board, candidates, current, target),
            CatStrategy::AStar => AStarStrategy.select_best_move(board, candidates, current, target),
        }
    }

    fn has_path_to_goal(&self, board: &HexBoard, pos: Hex) -> bool {
        match self {
            CatStrategy::Bfs => BfsStrategy.has_path_to_goal(board, pos),
            CatStrategy::AStar => AStarStrategy.has_path_to_goal(board, pos),
        }
    }

    fn full_path(&self, board: &HexBoard, current: Hex, target: Hex) -> Vec<Hex> {
        match self {
            CatStrategy::Bfs => BfsStrategy.full_path(board, current, target),
            CatStrategy::AStar => AStarStrategy.full_path(board, current, target),
        }
    }
}

/// Difficulty tier chosen by the player
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{other}', expected 'easy' or 'hard'")),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => f.write_str("easy"),
            Difficulty::Hard => f.write_str("hard"),
        }
    }
}
