//! Structured Extraction: page text + extraction template → model JSON.
//!
//! Flow: page_texts → concat_pages → build prompt → JSON-mode LLM call → trim.
//!
//! The model output is returned untouched apart from trimming. It is NOT parsed
//! or checked against the template; callers treat it as untrusted text.

use std::path::Path;

use tracing::info;

use crate::document::{concat_pages, PageTextPolicy, TextExtractor};
use crate::llm_client::prompts::{ASSISTANT_SYSTEM, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{ChatMessage, ChatRequest, LanguageModel, ResponseFormat, EXTRACTION_MODEL};
use crate::resume::prompts::EXTRACTION_PROMPT_TEMPLATE;
use crate::resume::PipelineError;

/// Collaborators for one extraction run.
pub struct Extraction<'a> {
    pub extractor: &'a dyn TextExtractor,
    pub llm: &'a dyn LanguageModel,
    pub template: &'a str,
    pub page_policy: PageTextPolicy,
}

/// Runs the extraction pipeline over the document at `path`.
pub async fn extract_structured(
    path: &Path,
    extraction: &Extraction<'_>,
) -> Result<String, PipelineError> {
    let pages = extraction.extractor.page_texts(path).await?;
    let cv_text = concat_pages(&pages, extraction.page_policy)?;
    info!(
        "Extracting structured CV from {} ({} page(s), {} chars)",
        path.display(),
        pages.len(),
        cv_text.len()
    );

    let request = extraction_request(&cv_text, extraction.template);
    let response = extraction.llm.complete(&request).await?;

    Ok(response.trim().to_string())
}

/// Builds the JSON-mode request for the text model.
pub fn extraction_request(cv_text: &str, template: &str) -> ChatRequest {
    ChatRequest {
        model: EXTRACTION_MODEL.to_string(),
        messages: vec![
            ChatMessage::system(ASSISTANT_SYSTEM),
            ChatMessage::user(build_extraction_prompt(cv_text, template)),
        ],
        response_format: Some(ResponseFormat::json_object()),
    }
}

/// Fills the extraction prompt. CV text is substituted last so placeholders
/// appearing inside a CV are never expanded.
pub fn build_extraction_prompt(cv_text: &str, template: &str) -> String {
    EXTRACTION_PROMPT_TEMPLATE
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
        .replace("{template}", template)
        .replace("{cv_text}", cv_text)
}
