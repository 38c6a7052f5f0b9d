//! Image encoding: `DynamicImage` → base64 JPEG data URI for vision requests.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, ImageFormat};
use tracing::debug;

use crate::document::DocumentError;

/// Encodes one page as `data:image/jpeg;base64,...`.
///
/// The JPEG encoder has no alpha channel, so the image is flattened to RGB first.
pub fn encode_jpeg_data_uri(img: &DynamicImage) -> Result<String, image::ImageError> {
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());

    let mut buf = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut buf), ImageFormat::Jpeg)?;

    let b64 = STANDARD.encode(&buf);
    debug!("Encoded image → {} bytes base64", b64.len());

    Ok(format!("data:image/jpeg;base64,{b64}"))
}

/// Encodes every page on the blocking pool, preserving order.
pub async fn encode_pages(images: Vec<DynamicImage>) -> Result<Vec<String>, DocumentError> {
    tokio::task::spawn_blocking(move || {
        images
            .iter()
            .map(encode_jpeg_data_uri)
            .collect::<Result<Vec<_>, _>>()
    })
    .await
    .map_err(|e| DocumentError::Worker(format!("encode task panicked: {e}")))?
    .map_err(DocumentError::from)
}
