//! Axum route handlers for the CV endpoints.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::errors::AppError;
use crate::models::ApplicationContext;
use crate::resume::critique::critique_resume;
use crate::resume::extraction::extract_structured;
use crate::resume::upload::{save_upload, ResumeUpload, FIELD_COMPANY, FIELD_FIELD, FIELD_ROLE};
use crate::state::AppState;

/// Prefix of the error string `/extract-cv` returns in place of a result.
pub const EXTRACTION_ERROR_PREFIX: &str = "Failed to extract CV: ";

/// POST /extract-cv
///
/// Returns the model's JSON text untouched. Pipeline failures are NOT raised:
/// they come back as a 200 with a plain error string, so callers cannot assume
/// the body is valid JSON.
pub async fn handle_extract_cv(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let upload = ResumeUpload::from_multipart(multipart).await?;
    upload.ensure_pdf()?;
    let path = save_upload(&state.config.upload_dir, &upload).await?;

    match extract_structured(&path, &state.extraction()).await {
        Ok(structured) => {
            Ok(([(header::CONTENT_TYPE, "application/json")], structured).into_response())
        }
        Err(e) => {
            warn!("CV extraction failed for {}: {e}", path.display());
            Ok(format!("{EXTRACTION_ERROR_PREFIX}{e}").into_response())
        }
    }
}

/// POST /improve-cv
///
/// Multipart: `cv` + `company`, `role`, `field`. Returns the critique as plain text.
/// Pipeline failures propagate as typed errors.
pub async fn handle_improve_cv(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<String, AppError> {
    let upload = ResumeUpload::from_multipart(multipart).await?;
    upload.ensure_pdf()?;
    let application = ApplicationContext {
        company: upload.require_field(FIELD_COMPANY)?,
        role: upload.require_field(FIELD_ROLE)?,
        field: upload.require_field(FIELD_FIELD)?,
    };
    let path = save_upload(&state.config.upload_dir, &upload).await?;

    let critique = critique_resume(
        &path,
        &application,
        &state.extraction(),
        state.rasterizer.as_ref(),
    )
    .await?;

    Ok(critique)
}
