use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use tokio::sync::{mpsc, oneshot};

use crate::classifier::{best_prediction, RoboflowClient};
use crate::error::ApiError;
use crate::game::GameCommand;
use crate::models::{DealerCardRequest, MessageResponse, RoundSnapshot, UploadResponse};

#[derive(Clone)]
pub struct AppState {
    pub manager_tx: mpsc::Sender<GameCommand>,
    pub classifier: Arc<RoboflowClient>,
}

async fn table_call<T>(
    manager_tx: &mpsc::Sender<GameCommand>,
    make: impl FnOnce(oneshot::Sender<T>) -> GameCommand,
) -> Result<T, ApiError> {
    let (tx, rx) = oneshot::channel();
    manager_tx
        .send(make(tx))
        .await
        .map_err(|_| ApiError::TableUnavailable)?;
    rx.await.map_err(|_| ApiError::TableUnavailable)
}

/// Camera frame upload: classify the image, then feed the detected card to
/// the table. Classification happens before any command is sent, so a
/// failed call never touches round state.
pub async fn upload(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<UploadResponse>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::EmptyUpload);
    }
    tracing::info!(bytes = body.len(), "image received");

    let predictions = state.classifier.classify(&body).await?;
    let best = best_prediction(predictions)?;
    tracing::info!(card = %best.label, confidence = best.confidence, "card detected");

    let snapshot = table_call(&state.manager_tx, |reply| GameCommand::DetectedCard {
        label: best.label.clone(),
        reply,
    })
    .await??;

    Ok(Json(UploadResponse {
        card_detected: best.label,
        confidence: best.confidence,
        snapshot,
    }))
}

pub async fn add_dealer_card(
    State(state): State<AppState>,
    Json(req): Json<DealerCardRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let snapshot = table_call(&state.manager_tx, |reply| GameCommand::DealerCard {
        label: req.card.clone(),
        reply,
    })
    .await??;

    Ok(Json(MessageResponse {
        message: format!("added card {} to dealer's hand", req.card),
        snapshot,
    }))
}

pub async fn stand(State(state): State<AppState>) -> Result<Json<MessageResponse>, ApiError> {
    let snapshot = table_call(&state.manager_tx, |reply| GameCommand::Stand { reply }).await??;

    Ok(Json(MessageResponse {
        message: "player stands".to_string(),
        snapshot,
    }))
}

pub async fn reset(State(state): State<AppState>) -> Result<Json<MessageResponse>, ApiError> {
    let snapshot = table_call(&state.manager_tx, |reply| GameCommand::Reset { reply }).await?;

    Ok(Json(MessageResponse {
        message: "hand reset".to_string(),
        snapshot,
    }))
}

pub async fn game_state(State(state): State<AppState>) -> Result<Json<RoundSnapshot>, ApiError> {
    let snapshot = table_call(&state.manager_tx, |reply| GameCommand::GetState { reply }).await?;
    Ok(Json(snapshot))
}
