use docreview_core::{ClientConfig, ClientError};

use crate::classifier::{file_extension, DOCX_CONTENT_TYPE, DOC_CONTENT_TYPE, PDF_CONTENT_TYPE};

/// File picker filter for uploads: any image, PDF or Word document.
pub const UPLOAD_ACCEPT: &str = "image/*,application/pdf,.doc,.docx,application/msword,application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Validation errors for files picked for upload
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("File type not accepted: {filename} (accepted: {accept})")]
    NotAccepted { filename: String, accept: String },

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Empty file")]
    EmptyFile,
}

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        ClientError::InvalidInput(err.to_string())
    }
}

/// Content type implied by a filename extension.
pub fn content_type_for_filename(filename: &str) -> Option<&'static str> {
    let content_type = match file_extension(filename).as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "heic" => "image/heic",
        "pdf" => PDF_CONTENT_TYPE,
        "doc" => DOC_CONTENT_TYPE,
        "docx" => DOCX_CONTENT_TYPE,
        _ => return None,
    };
    Some(content_type)
}

/// Whether a file passes an HTML-style accept filter
/// (`.ext`, `type/*` and exact `type/subtype` entries).
pub fn matches_accept(accept: &str, filename: &str, content_type: Option<&str>) -> bool {
    let extension = file_extension(filename);
    let content_type = content_type
        .map(|ct| ct.trim().to_lowercase())
        .or_else(|| content_type_for_filename(filename).map(str::to_string));

    accept
        .split(',')
        .map(|entry| entry.trim().to_lowercase())
        .filter(|entry| !entry.is_empty())
        .any(|entry| {
            if let Some(ext) = entry.strip_prefix('.') {
                ext == extension
            } else if let Some(major) = entry.strip_suffix("/*") {
                content_type
                    .as_deref()
                    .and_then(|ct| ct.split_once('/'))
                    .is_some_and(|(m, _)| m == major)
            } else {
                content_type.as_deref() == Some(entry.as_str())
            }
        })
}

/// Upload validator
///
/// Applies the picker's accept filter and a size limit before a file is
/// encoded and sent.
pub struct UploadValidator {
    max_file_size: usize,
    accept: String,
}

impl UploadValidator {
    pub fn new(max_file_size: usize, accept: impl Into<String>) -> Self {
        Self {
            max_file_size,
            accept: accept.into(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.max_upload_size_bytes, UPLOAD_ACCEPT)
    }

    pub fn accept(&self) -> &str {
        &self.accept
    }

    /// Validate file size
    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// Validate the file against the accept filter
    pub fn validate_type(
        &self,
        filename: &str,
        content_type: Option<&str>,
    ) -> Result<(), ValidationError> {
        if filename.trim().is_empty() {
            return Err(ValidationError::InvalidFilename(filename.to_string()));
        }

        if !matches_accept(&self.accept, filename, content_type) {
            return Err(ValidationError::NotAccepted {
                filename: filename.to_string(),
                accept: self.accept.clone(),
            });
        }

        Ok(())
    }

    pub fn validate_all(
        &self,
        filename: &str,
        content_type: Option<&str>,
        file_size: usize,
    ) -> Result<(), ValidationError> {
        self.validate_type(filename, content_type)?;
        self.validate_file_size(file_size)?;
        Ok(())
    }
}
