pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::feedback::handlers::handle_feedback;
use crate::resume::handlers::{handle_extract_cv, handle_improve_cv};
use crate::state::AppState;

/// Upper bound on a request body; CV uploads are larger than axum's 2 MB default.
const MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // CV pipelines
        .route("/extract-cv", post(handle_extract_cv))
        .route("/improve-cv", post(handle_improve_cv))
        // Feedback
        .route("/feedback", post(handle_feedback))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
