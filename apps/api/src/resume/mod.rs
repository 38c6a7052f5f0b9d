// Resume pipelines: structured extraction and multimodal critique.
// All LLM calls go through the LanguageModel trait; no direct provider calls here.

pub mod critique;
pub mod extraction;
pub mod handlers;
pub mod prompts;
pub mod template;
pub mod upload;

use thiserror::Error;

use crate::document::DocumentError;
use crate::llm_client::LlmError;

/// Failures of either pipeline, grouped by the collaborator that failed.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("document read error: {0}")]
    DocumentRead(DocumentError),

    #[error("rasterization error: {0}")]
    Rasterization(DocumentError),

    #[error("provider error: {0}")]
    Provider(#[from] LlmError),
}

/// Text extraction failures are read errors; the render path maps its own.
impl From<DocumentError> for PipelineError {
    fn from(err: DocumentError) -> Self {
        PipelineError::DocumentRead(err)
    }
}
