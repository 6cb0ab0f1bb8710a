//! Game API routes
//!
//! Create games, block cells, and read views, analysis and suggestions.

use super::{ApiError, ApiResult};
use crate::service::{GameAnalysis, GameView};
use crate::state::ServerState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use hexcat_core::{Difficulty, Hex, TurnOutcome};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Create game request
#[derive(Deserialize, Default)]
pub struct CreateGameRequest {
    pub board_size: Option<i32>,
    /// "easy" or "hard", case-insensitive
    pub difficulty: Option<String>,
}

/// Cell in axial coordinates
#[derive(Deserialize)]
pub struct CellRequest {
    pub q: i32,
    pub r: i32,
}

#[derive(Serialize)]
pub struct MoveResponse {
    pub game: GameView,
    pub outcome: TurnOutcome,
}

#[derive(Serialize)]
pub struct SuggestionResponse {
    pub game_id: String,
    pub suggestion: Option<Hex>,
}

#[derive(Serialize)]
pub struct ValidityResponse {
    pub cell: Hex,
    pub valid: bool,
}

/// Start a new game
pub async fn create_game(
    State(state): State<Arc<ServerState>>,
    body: Option<Json<CreateGameRequest>>,
) -> Result<(StatusCode, Json<GameView>), ApiError> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let board_size = req
        .board_size
        .unwrap_or(state.games.config().default_board_size);
    let difficulty = match req.difficulty.as_deref() {
        Some(text) => text.parse::<Difficulty>().map_err(ApiError::BadRequest)?,
        None => Difficulty::default(),
    };

    let game = state.games.create_game(board_size, difficulty)?;
    Ok((StatusCode::CREATED, Json(GameView::from(&game))))
}

/// Get the enriched view of a game
pub async fn get_game(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> ApiResult<GameView> {
    Ok(Json(state.games.game_view(&id)?))
}

/// Block a cell and let the cat respond
pub async fn make_move(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    Json(req): Json<CellRequest>,
) -> ApiResult<MoveResponse> {
    let (game, outcome) = state.games.execute_player_move(&id, Hex::new(req.q, req.r))?;
    Ok(Json(MoveResponse {
        game: GameView::from(&game),
        outcome,
    }))
}

/// Check a cell without playing it
pub async fn check_move(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    Query(req): Query<CellRequest>,
) -> ApiResult<ValidityResponse> {
    let cell = Hex::new(req.q, req.r);
    let valid = state.games.is_valid_move(&id, cell)?;
    Ok(Json(ValidityResponse { cell, valid }))
}

/// Abort a running game
pub async fn abort_game(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> ApiResult<GameView> {
    let game = state.games.abort_game(&id)?;
    Ok(Json(GameView::from(&game)))
}

pub async fn analyze_game(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> ApiResult<GameAnalysis> {
    Ok(Json(state.games.analyze_game(&id)?))
}

pub async fn suggest_move(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> ApiResult<SuggestionResponse> {
    let suggestion = state.games.suggest_move(&id)?;
    Ok(Json(SuggestionResponse {
        game_id: id,
        suggestion,
    }))
}
