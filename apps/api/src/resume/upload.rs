//! Multipart upload handling shared by the CV endpoints.
//!
//! Uploads are written to the upload directory under their original file name.
//! Two concurrent uploads with the same name overwrite each other, and files
//! are never cleaned up.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use axum::extract::Multipart;
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;

/// Multipart field carrying the CV document.
pub const FILE_FIELD: &str = "cv";

/// Form fields `/improve-cv` requires alongside the document. Earlier clients
/// sent these as `cong_ty_ung_tuyen`, `vi_tri_ung_tuyen` and `linh_vuc`.
pub const FIELD_COMPANY: &str = "company";
pub const FIELD_ROLE: &str = "role";
pub const FIELD_FIELD: &str = "field";

/// User-facing rejection for anything that is not a PDF.
pub const PDF_ONLY_MESSAGE: &str = "Only PDF files are supported.";

/// A parsed upload: the document plus any plain form fields.
#[derive(Debug)]
pub struct ResumeUpload {
    pub file_name: String,
    pub data: Bytes,
    pub fields: HashMap<String, String>,
}

impl ResumeUpload {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut file: Option<(String, Bytes)> = None;
        let mut fields = HashMap::new();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            if name == FILE_FIELD {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid file upload: {e}")))?;
                file = Some((file_name, data));
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid form field '{name}': {e}")))?;
                fields.insert(name, value);
            }
        }

        let (file_name, data) = file
            .ok_or_else(|| AppError::Validation(format!("Missing file field '{FILE_FIELD}'")))?;

        Ok(Self {
            file_name,
            data,
            fields,
        })
    }

    /// Rejects anything whose file name does not end in `.pdf`.
    pub fn ensure_pdf(&self) -> Result<(), AppError> {
        if self.file_name.ends_with(".pdf") {
            Ok(())
        } else {
            Err(AppError::UnsupportedFile(PDF_ONLY_MESSAGE.to_string()))
        }
    }

    pub fn require_field(&self, name: &str) -> Result<String, AppError> {
        self.fields
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::Validation(format!("Missing form field '{name}'")))
    }
}

/// Writes the upload into `dir`, keyed by its file name, and returns the path.
pub async fn save_upload(dir: &Path, upload: &ResumeUpload) -> Result<PathBuf, AppError> {
    // only the final component: a client-supplied name never leaves the upload dir
    let name = Path::new(&upload.file_name)
        .file_name()
        .ok_or_else(|| AppError::Validation("Invalid file name".to_string()))?;
    let path = dir.join(name);

    tokio::fs::write(&path, &upload.data)
        .await
        .with_context(|| format!("Failed to store upload at {}", path.display()))?;

    info!("Stored upload {} ({} bytes)", path.display(), upload.data.len());
    Ok(path)
}
