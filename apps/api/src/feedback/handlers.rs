//! Axum route handlers for the Feedback API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::FeedbackRecord;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub message: String,
    pub id: String,
}

/// POST /feedback
///
/// Body: `{rating, comment?}`. A missing or non-integer rating is rejected by
/// the JSON extractor before the store is reached.
pub async fn handle_feedback(
    State(state): State<AppState>,
    Json(record): Json<FeedbackRecord>,
) -> Result<Json<FeedbackResponse>, AppError> {
    let id = state.feedback.insert(&record).await?;

    Ok(Json(FeedbackResponse {
        message: "Feedback saved".to_string(),
        id,
    }))
}
