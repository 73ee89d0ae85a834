use crate::core::state::AppState;
use crate::models::api::MessagesResponse;
use axum::{extract::State, Json};
use std::sync::Arc;

/// GET /messages
pub async fn messages_handler(State(state): State<Arc<AppState>>) -> Json<MessagesResponse> {
    Json(MessagesResponse {
        messages: state.messages.messages(),
    })
}

/// DELETE /messages
pub async fn clear_messages_handler(State(state): State<Arc<AppState>>) -> Json<MessagesResponse> {
    state.messages.clear();
    Json(MessagesResponse {
        messages: Vec::new(),
    })
}
