use bytes::Bytes;
use std::path::Path;
use tokio::fs;
use uuid::Uuid;

use crate::config::get_config;
use crate::error::{Error, Result};

const ALLOWED_EXTENSIONS: [&str; 9] = [
    "pdf", "doc", "docx", "txt", "rtf", "jpg", "jpeg", "png", "webp",
];

fn resume_extension(filename: &str) -> Result<String> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_else(|| "bin".to_string());

    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(Error::BadRequest(format!(
            "File type .{} is not allowed",
            ext
        )));
    }
    Ok(ext)
}

fn check_content(ext: &str, data: &Bytes) -> Result<()> {
    if ext == "pdf" && !data.starts_with(b"%PDF") {
        return Err(Error::BadRequest("Invalid PDF file content".into()));
    }
    if (ext == "jpg" || ext == "jpeg") && !data.starts_with(&[0xFF, 0xD8]) {
        return Err(Error::BadRequest("Invalid JPEG file content".into()));
    }
    if ext == "png" && !data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        return Err(Error::BadRequest("Invalid PNG file content".into()));
    }
    Ok(())
}

/// Stores an uploaded resume under a generated name and returns the
/// public path it is served from.
pub async fn store_resume(filename: &str, data: &Bytes) -> Result<String> {
    let ext = resume_extension(filename)?;
    check_content(&ext, data)?;

    let resumes_dir = format!("{}/resumes", get_config().uploads_dir);
    fs::create_dir_all(&resumes_dir)
        .await
        .map_err(|e| Error::Internal(format!("Failed to create uploads dir: {}", e)))?;

    let stored_name = format!("{}.{}", Uuid::new_v4(), ext);
    let file_path = format!("{}/{}", resumes_dir, stored_name);

    fs::write(&file_path, data).await.map_err(|e| {
        tracing::error!("Failed to write resume file: {}", e);
        Error::Internal(format!("Failed to save file: {}", e))
    })?;

    Ok(format!("/uploads/resumes/{}", stored_name))
}
