//! Leaderboard and aggregate statistics

use super::ApiResult;
use crate::service::{LeaderboardEntry, PlayerStatistics};
use crate::state::ServerState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

#[derive(Deserialize)]
pub struct LeaderboardParams {
    pub limit: Option<usize>,
}

pub async fn get_leaderboard(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<LeaderboardParams>,
) -> ApiResult<Vec<LeaderboardEntry>> {
    let limit = params.limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT);
    Ok(Json(state.games.leaderboard(limit)?))
}

pub async fn get_statistics(State(state): State<Arc<ServerState>>) -> ApiResult<PlayerStatistics> {
    Ok(Json(state.games.statistics()?))
}
