//! HTTP route handlers

pub mod board;
pub mod game;
pub mod stats;
pub mod status;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hexcat_core::GameError;
use serde_json::json;

/// Error returned by handlers, rendered as `{"error": "..."}`
#[derive(Debug)]
pub enum ApiError {
    Game(GameError),
    BadRequest(String),
}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        ApiError::Game(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Game(err) => {
                let status = match &err {
                    GameError::InvalidMove { .. }
                    | GameError::InvalidBoardSize(_)
                    | GameError::InvalidRecord(_) => StatusCode::BAD_REQUEST,
                    GameError::NotFound(_) => StatusCode::NOT_FOUND,
                    GameError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                if status.is_server_error() {
                    tracing::error!(error = %err, "request failed");
                }
                (status, err.to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;
