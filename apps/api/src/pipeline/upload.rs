//! Accepted-type validation for uploaded resumes.

use serde::Deserialize;

use crate::errors::AppError;

/// Uploads larger than this are rejected.
pub const MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// What the service knows about an uploaded file. Content is never read.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
    pub name: String,
    pub size: u64,
    #[serde(default)]
    pub content_type: Option<String>,
}

impl FileDescriptor {
    pub fn new(name: impl Into<String>, size: u64, content_type: Option<&str>) -> Self {
        Self {
            name: name.into(),
            size,
            content_type: content_type.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Doc,
    Docx,
}

impl DocumentKind {
    pub fn from_extension(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "doc" => Some(DocumentKind::Doc),
            "docx" => Some(DocumentKind::Docx),
            _ => None,
        }
    }

    pub fn from_mime(content_type: &str) -> Option<Self> {
        // Ignore parameters such as "; charset=binary".
        let essence = content_type.split(';').next()?.trim().to_ascii_lowercase();
        match essence.as_str() {
            "application/pdf" => Some(DocumentKind::Pdf),
            "application/msword" => Some(DocumentKind::Doc),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(DocumentKind::Docx)
            }
            _ => None,
        }
    }
}

/// Checks a file before any state is touched. Accepts PDF, DOC or DOCX by
/// extension or declared MIME type.
pub fn validate(file: &FileDescriptor) -> Result<DocumentKind, AppError> {
    if file.name.trim().is_empty() {
        return Err(AppError::Validation("No file selected".to_string()));
    }

    if file.size > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation(format!(
            "{} is {} bytes; the limit is {MAX_UPLOAD_BYTES} bytes",
            file.name, file.size
        )));
    }

    DocumentKind::from_extension(&file.name)
        .or_else(|| file.content_type.as_deref().and_then(DocumentKind::from_mime))
        .ok_or_else(|| {
            AppError::Validation(format!(
                "Invalid file type for {}. Please upload PDF, DOC, or DOCX files.",
                file.name
            ))
        })
}
