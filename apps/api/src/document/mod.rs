// Document access: page text extraction, page rasterisation and image encoding.
// Parsing and rendering are blocking and run inside tokio::task::spawn_blocking.

pub mod encode;
pub mod raster;
pub mod text;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use image::DynamicImage;
use thiserror::Error;

pub use encode::encode_pages;
pub use raster::PopplerRasterizer;
pub use text::{concat_pages, PageTextPolicy, PdfTextExtractor};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("cannot read document {path}: {detail}")]
    Read { path: PathBuf, detail: String },

    #[error("page {page} has no extractable text")]
    EmptyPage { page: usize },

    #[error("rasterisation failed: {0}")]
    Rasterization(String),

    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("document worker failed: {0}")]
    Worker(String),
}

/// Returns the text of each page, in page order.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn page_texts(&self, path: &Path) -> Result<Vec<String>, DocumentError>;
}

/// Renders each page to an in-memory image, in page order.
#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn rasterize(&self, path: &Path) -> Result<Vec<DynamicImage>, DocumentError>;
}
