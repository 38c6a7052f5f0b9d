//! Test doubles for the external collaborators injected through `AppState`.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use image::{DynamicImage, Rgb, RgbImage};

use crate::config::Config;
use crate::document::{DocumentError, PageTextPolicy, Rasterizer, TextExtractor};
use crate::feedback::{FeedbackStore, StorageError};
use crate::llm_client::{ChatRequest, LanguageModel, LlmError};
use crate::models::FeedbackRecord;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Language model
// ────────────────────────────────────────────────────────────────────────────

/// Records every request and answers with a fixed reply or a fixed API error.
pub struct FakeLanguageModel {
    reply: Result<String, (u16, String)>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl FakeLanguageModel {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16, message: &str) -> Self {
        Self {
            reply: Err((status, message.to_string())),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for FakeLanguageModel {
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err((status, message)) => Err(LlmError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document collaborators
// ────────────────────────────────────────────────────────────────────────────

pub struct FakeExtractor {
    pages: Vec<String>,
    calls: AtomicUsize,
}

impl FakeExtractor {
    pub fn new(pages: &[&str]) -> Self {
        Self {
            pages: pages.iter().map(|p| p.to_string()).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextExtractor for FakeExtractor {
    async fn page_texts(&self, _path: &Path) -> Result<Vec<String>, DocumentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.pages.clone())
    }
}

/// Distinct, deterministic image for page `index` (size and colour vary per page).
pub fn page_image(index: usize) -> DynamicImage {
    let shade = (index * 60 % 256) as u8;
    let side = 8 + index as u32 * 4;
    DynamicImage::ImageRgb8(RgbImage::from_pixel(side, side, Rgb([shade, 255 - shade, 128])))
}

pub struct FakeRasterizer {
    pages: Option<usize>,
    calls: AtomicUsize,
}

impl FakeRasterizer {
    pub fn new(pages: usize) -> Self {
        Self {
            pages: Some(pages),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            pages: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Rasterizer for FakeRasterizer {
    async fn rasterize(&self, _path: &Path) -> Result<Vec<DynamicImage>, DocumentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.pages {
            Some(n) => Ok((0..n).map(page_image).collect()),
            None => Err(DocumentError::Rasterization("pdftoppm not installed".to_string())),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Feedback store
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryFeedbackStore {
    records: Mutex<Vec<(String, FeedbackRecord)>>,
}

impl InMemoryFeedbackStore {
    pub fn records(&self) -> Vec<(String, FeedbackRecord)> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedbackStore for InMemoryFeedbackStore {
    async fn insert(&self, record: &FeedbackRecord) -> Result<String, StorageError> {
        let mut records = self.records.lock().unwrap();
        let id = format!("fb-{}", records.len() + 1);
        records.push((id.clone(), record.clone()));
        Ok(id)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// App state
// ────────────────────────────────────────────────────────────────────────────

pub fn test_config(upload_dir: PathBuf) -> Config {
    Config {
        groq_api_key: "test-key".to_string(),
        groq_api_url: "http://localhost/unused".to_string(),
        database_url: "postgres://localhost/unused".to_string(),
        template_path: PathBuf::from("config/extraction_template.json"),
        upload_dir,
        raster_dpi: 72,
        pdftoppm_bin: "pdftoppm".to_string(),
        page_policy: PageTextPolicy::Strict,
        llm_timeout_secs: 5,
        port: 0,
        rust_log: "debug".to_string(),
    }
}

/// Handles to the fakes behind an `AppState`, for asserting on calls afterwards.
pub struct TestHarness {
    pub state: AppState,
    pub llm: Arc<FakeLanguageModel>,
    pub extractor: Arc<FakeExtractor>,
    pub rasterizer: Arc<FakeRasterizer>,
    pub feedback: Arc<InMemoryFeedbackStore>,
}

impl TestHarness {
    pub fn new(llm: FakeLanguageModel, pages: &[&str], upload_dir: PathBuf) -> Self {
        let llm = Arc::new(llm);
        let extractor = Arc::new(FakeExtractor::new(pages));
        let rasterizer = Arc::new(FakeRasterizer::new(pages.len()));
        let feedback = Arc::new(InMemoryFeedbackStore::default());

        let state = AppState {
            llm: llm.clone(),
            extractor: extractor.clone(),
            rasterizer: rasterizer.clone(),
            feedback: feedback.clone(),
            template: Arc::from("{\n  \"full_name\": \"\"\n}"),
            config: test_config(upload_dir),
        };

        Self {
            state,
            llm,
            extractor,
            rasterizer,
            feedback,
        }
    }
}
