//! Resume upload checks and the extraction stub.
//!
//! Declared type and size are validated before the bytes are looked at;
//! a rejected upload does no processing and leaves no partial write. Real
//! document parsing is out of scope — callers get the raw text head only.

use crate::errors::AppError;
use crate::models::student::ResumeData;

/// Upload cap, matching the client-side limit.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Mime types the upload endpoint accepts.
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
];

/// How much raw text the stub extractor keeps.
const RAW_TEXT_HEAD_CHARS: usize = 5000;

/// Rejects an upload whose declared content type or size is out of bounds.
pub fn validate_upload(content_type: Option<&str>, size: usize) -> Result<(), AppError> {
    match content_type {
        Some(ct) if ALLOWED_MIME_TYPES.contains(&ct) => {}
        Some(ct) => {
            return Err(AppError::UnsupportedMediaType(format!(
                "Invalid file type '{ct}'. Only PDF, DOC, DOCX, and TXT files are allowed."
            )))
        }
        None => {
            return Err(AppError::UnsupportedMediaType(
                "Missing content type. Only PDF, DOC, DOCX, and TXT files are allowed.".to_string(),
            ))
        }
    }

    if size > MAX_UPLOAD_BYTES {
        return Err(AppError::PayloadTooLarge(format!(
            "Resume exceeds the {} MB upload limit",
            MAX_UPLOAD_BYTES / (1024 * 1024)
        )));
    }

    Ok(())
}

/// Extraction stub: lossy-decodes the bytes and keeps the head as `raw_text`.
/// All structured fields stay empty.
pub fn extract_resume_stub(bytes: &[u8]) -> ResumeData {
    let text = String::from_utf8_lossy(bytes);
    let raw_text: String = text.chars().take(RAW_TEXT_HEAD_CHARS).collect();
    ResumeData {
        raw_text: Some(raw_text),
        ..Default::default()
    }
}
