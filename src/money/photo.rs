//! Profile photo encoding
//!
//! A picked image is embedded in the profile as a `data:` URI so the whole
//! document stays self-contained in its slot.

use crate::error::{AppError, AppResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;

/// Media type for a file extension, `None` if it is not an image we accept
pub fn mime_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// Encode raw image bytes as a data URI
pub fn encode_bytes(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Read an image file into a data URI
pub fn encode_file(path: &Path) -> AppResult<String> {
    let mime = mime_for(path).ok_or_else(|| {
        AppError::Photo(format!("unsupported image type: {}", path.display()))
    })?;

    let bytes = std::fs::read(path)
        .map_err(|e| AppError::Photo(format!("cannot read {}: {}", path.display(), e)))?;

    tracing::debug!("Encoded photo {:?} ({} bytes)", path, bytes.len());
    Ok(encode_bytes(mime, &bytes))
}
