use axum::routing::{get, post};
use axum::Router;

use crate::app::handlers::{self, AppState};

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/upload", post(handlers::upload))
        .route("/dealer/card", post(handlers::add_dealer_card))
        .route("/stand", post(handlers::stand))
        .route("/reset", post(handlers::reset))
        .route("/state", get(handlers::game_state))
        .with_state(state)
}
