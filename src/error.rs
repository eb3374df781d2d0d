use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::classifier::ClassifierError;

/// Request-level game errors. Every variant leaves the round untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid card: {0}")]
    InvalidCardLabel(String),
    #[error("duplicate card {0} rejected by table policy")]
    DuplicateCard(String),
    #[error("no active game, scan a card to start")]
    NoActiveRound,
    #[error("dealer's cards not set")]
    DealerNotSet,
}

/// Everything a handler can fail with, mapped onto HTTP statuses.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
    #[error("no image data received")]
    EmptyUpload,
    #[error("table unavailable")]
    TableUnavailable,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Game(_) | ApiError::EmptyUpload => StatusCode::BAD_REQUEST,
            ApiError::Classifier(ClassifierError::NoCardDetected) => StatusCode::BAD_REQUEST,
            ApiError::Classifier(_) => StatusCode::BAD_GATEWAY,
            ApiError::TableUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
