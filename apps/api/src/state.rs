use std::sync::Arc;

use crate::config::Config;
use crate::document::{Rasterizer, TextExtractor};
use crate::feedback::FeedbackStore;
use crate::llm_client::LanguageModel;
use crate::resume::extraction::Extraction;

/// Shared application state injected into all route handlers via Axum extractors.
/// Every external collaborator is a trait object so tests can swap in fakes.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn LanguageModel>,
    pub extractor: Arc<dyn TextExtractor>,
    pub rasterizer: Arc<dyn Rasterizer>,
    pub feedback: Arc<dyn FeedbackStore>,
    /// Extraction template, loaded once at startup and never mutated.
    pub template: Arc<str>,
    pub config: Config,
}

impl AppState {
    /// Borrows the collaborators needed by the extraction pipeline.
    pub fn extraction(&self) -> Extraction<'_> {
        Extraction {
            extractor: self.extractor.as_ref(),
            llm: self.llm.as_ref(),
            template: &self.template,
            page_policy: self.config.page_policy,
        }
    }
}
