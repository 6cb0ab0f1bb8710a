//! Board geometry endpoint

use super::{ApiError, ApiResult};
use crate::state::ServerState;
use axum::{
    extract::{Query, State},
    Json,
};
use hexcat_core::{GameError, Hex, HexBoard, DIRECTIONS};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Serialize)]
pub struct BoardInfo {
    pub size: i32,
    /// Cells the player may block
    pub hexes: Vec<[i32; 2]>,
    /// Outermost ring, where the cat escapes
    pub border: Vec<[i32; 2]>,
    pub directions: Vec<[i32; 2]>,
    pub direction_names: Vec<&'static str>,
}

#[derive(Deserialize)]
pub struct BoardParams {
    pub size: Option<i32>,
}

fn pair(pos: Hex) -> [i32; 2] {
    [pos.q, pos.r]
}

/// Ring of cells at exactly `size` steps from the center
fn border_ring(board: &HexBoard) -> Vec<[i32; 2]> {
    let size = board.size();
    let mut hexes = Vec::new();
    for q in -size..=size {
        for r in -size..=size {
            let pos = Hex::new(q, r);
            if board.is_in_bounds(pos) && board.is_at_border(pos) {
                hexes.push(pair(pos));
            }
        }
    }
    hexes
}

/// Get board geometry for a size (service default when omitted)
pub async fn get_board(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<BoardParams>,
) -> ApiResult<BoardInfo> {
    let config = state.games.config();
    let size = params.size.unwrap_or(config.default_board_size);
    if !config.allows(size) {
        return Err(ApiError::from(GameError::InvalidBoardSize(size)));
    }
    let board = HexBoard::new(size)?;

    Ok(Json(BoardInfo {
        size,
        hexes: board.playable_cells().map(pair).collect(),
        border: border_ring(&board),
        directions: DIRECTIONS.iter().copied().map(pair).collect(),
        direction_names: vec!["E", "NE", "NW", "W", "SW", "SE"],
    }))
}
