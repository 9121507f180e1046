use std::fs;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::errors::AppError;

/// Reads an image and returns it as a `data:` URL, the opaque payload stored
/// in a contact's `photo` field.
pub fn encode_photo(path: impl AsRef<Path>) -> Result<String, AppError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(AppError::NotFound(format!("Photo {}", path.display())));
    }

    let bytes = fs::read(path)?;
    if bytes.is_empty() {
        return Err(AppError::Photo(format!("{} is empty", path.display())));
    }

    Ok(format!(
        "data:{};base64,{}",
        mime_for(path),
        STANDARD.encode(&bytes)
    ))
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}
