//! Page rasterisation by shelling out to poppler's `pdftoppm`.
//!
//! `pdftoppm` writes one PNG per page into a scratch directory. Pages are
//! rendered losslessly; the only lossy step is the JPEG data-URI encoding.
//! The files are decoded into memory and the directory is removed when the
//! `TempDir` drops, so nothing rendered outlives the request.

use std::path::{Path, PathBuf};
use std::process::Command;

use async_trait::async_trait;
use image::DynamicImage;
use tracing::{debug, info};

use crate::document::{DocumentError, Rasterizer};

const OUTPUT_PREFIX: &str = "page";

#[derive(Debug, Clone)]
pub struct PopplerRasterizer {
    binary: String,
    dpi: u32,
}

impl PopplerRasterizer {
    pub fn new(binary: String, dpi: u32) -> Self {
        Self { binary, dpi }
    }
}

#[async_trait]
impl Rasterizer for PopplerRasterizer {
    async fn rasterize(&self, path: &Path) -> Result<Vec<DynamicImage>, DocumentError> {
        let this = self.clone();
        let path = path.to_path_buf();

        tokio::task::spawn_blocking(move || this.rasterize_blocking(&path))
            .await
            .map_err(|e| DocumentError::Worker(format!("render task panicked: {e}")))?
    }
}

impl PopplerRasterizer {
    fn render_command(&self, pdf_path: &Path, out_dir: &Path) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .arg("-png")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg(pdf_path)
            .arg(out_dir.join(OUTPUT_PREFIX));
        command
    }

    fn rasterize_blocking(&self, pdf_path: &Path) -> Result<Vec<DynamicImage>, DocumentError> {
        let scratch = tempfile::tempdir()
            .map_err(|e| DocumentError::Rasterization(format!("cannot create scratch dir: {e}")))?;

        let output = self
            .render_command(pdf_path, scratch.path())
            .output()
            .map_err(|e| {
                DocumentError::Rasterization(format!(
                    "failed to invoke {}; is poppler-utils installed? ({e})",
                    self.binary
                ))
            })?;

        if !output.status.success() {
            return Err(DocumentError::Rasterization(format!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let files = rendered_pages(scratch.path())?;
        if files.is_empty() {
            return Err(DocumentError::Rasterization(
                "renderer produced no pages".to_string(),
            ));
        }

        let mut images = Vec::with_capacity(files.len());
        for (page, file) in files {
            let image = image::open(&file)?;
            debug!("Rendered page {page} → {}x{} px", image.width(), image.height());
            images.push(image);
        }

        info!("Rasterised {} page(s) of {}", images.len(), pdf_path.display());
        Ok(images)
    }
}

/// Lists rendered page files sorted by page number.
///
/// `pdftoppm` names files `<prefix>-<n>.png` and zero-pads `n` according to the
/// page count, so the number is parsed rather than sorting names lexically.
fn rendered_pages(dir: &Path) -> Result<Vec<(usize, PathBuf)>, DocumentError> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| DocumentError::Rasterization(format!("cannot list rendered pages: {e}")))?;

    let mut pages: Vec<(usize, PathBuf)> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter_map(|path| {
            let name = path.file_name()?.to_str()?;
            page_number(name).map(|n| (n, path.clone()))
        })
        .collect();

    pages.sort_by_key(|(n, _)| *n);
    Ok(pages)
}

/// Parses the page number out of `page-007.png`.
fn page_number(file_name: &str) -> Option<usize> {
    let stem = file_name.strip_suffix(".png")?;
    let number = stem.strip_prefix(OUTPUT_PREFIX)?.strip_prefix('-')?;
    number.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_number_parses_padded_names() {
        assert_eq!(page_number("page-1.png"), Some(1));
        assert_eq!(page_number("page-07.png"), Some(7));
        assert_eq!(page_number("page-112.png"), Some(112));
    }

    #[test]
    fn test_page_number_ignores_foreign_files() {
        assert_eq!(page_number("page-1.jpg"), None);
        assert_eq!(page_number("cover-1.png"), None);
        assert_eq!(page_number("page.png"), None);
    }

    #[test]
    fn test_rendered_pages_sorted_numerically() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["page-10.png", "page-02.png", "page-1.png", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }

        let pages = rendered_pages(dir.path()).unwrap();
        let numbers: Vec<usize> = pages.iter().map(|(n, _)| *n).collect();
        assert_eq!(numbers, vec![1, 2, 10]);
    }

    #[test]
    fn test_render_command_requests_lossless_png() {
        let rasterizer = PopplerRasterizer::new("pdftoppm".to_string(), 200);
        let command = rasterizer.render_command(Path::new("/uploads/cv.pdf"), Path::new("/tmp/render"));

        assert_eq!(command.get_program(), "pdftoppm");
        let args: Vec<&std::ffi::OsStr> = command.get_args().collect();
        assert_eq!(
            args,
            ["-png", "-r", "200", "/uploads/cv.pdf", "/tmp/render/page"]
        );
    }

    #[tokio::test]
    async fn test_missing_binary_is_rasterization_error() {
        let rasterizer = PopplerRasterizer::new("definitely-not-pdftoppm".to_string(), 72);
        let err = rasterizer
            .rasterize(Path::new("/nonexistent/cv.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, DocumentError::Rasterization(_)));
    }
}
