//! CV Critique: one multimodal request combining extracted content and page images.
//!
//! Flow: extract_structured (re-run, not memoised) → rasterize → encode pages →
//!       instruction + extraction + one image part per page → vision LLM → trim.
//!
//! All pages go into a single request so the critique covers the whole document.
//! There is no page cap.

use std::path::Path;

use tracing::info;

use crate::document::{encode_pages, Rasterizer};
use crate::llm_client::{ChatMessage, ChatRequest, ContentPart, CRITIQUE_MODEL};
use crate::models::ApplicationContext;
use crate::resume::extraction::{extract_structured, Extraction};
use crate::resume::prompts::{CRITIQUE_PROMPT_TEMPLATE, EXTRACTED_CONTENT_HEADING};
use crate::resume::PipelineError;

/// Runs the critique pipeline over the document at `path`.
pub async fn critique_resume(
    path: &Path,
    application: &ApplicationContext,
    extraction: &Extraction<'_>,
    rasterizer: &dyn Rasterizer,
) -> Result<String, PipelineError> {
    let structured = extract_structured(path, extraction).await?;

    let images = rasterizer
        .rasterize(path)
        .await
        .map_err(PipelineError::Rasterization)?;
    let page_uris = encode_pages(images)
        .await
        .map_err(PipelineError::Rasterization)?;

    info!(
        "Requesting critique for {} ({} page image(s), target: {} at {})",
        path.display(),
        page_uris.len(),
        application.role,
        application.company
    );

    let request = critique_request(application, &structured, page_uris);
    let response = extraction.llm.complete(&request).await?;

    Ok(response.trim().to_string())
}

/// Builds the single-turn vision request. Image parts follow the text parts,
/// one per page, in page order.
pub fn critique_request(
    application: &ApplicationContext,
    structured: &str,
    page_uris: Vec<String>,
) -> ChatRequest {
    let instruction = CRITIQUE_PROMPT_TEMPLATE.replace("{application}", &application.describe());

    let mut parts = Vec::with_capacity(page_uris.len() + 2);
    parts.push(ContentPart::text(instruction));
    parts.push(ContentPart::text(format!("{EXTRACTED_CONTENT_HEADING}{structured}")));
    parts.extend(page_uris.into_iter().map(ContentPart::image));

    ChatRequest {
        model: CRITIQUE_MODEL.to_string(),
        messages: vec![ChatMessage::user_parts(parts)],
        response_format: None,
    }
}
