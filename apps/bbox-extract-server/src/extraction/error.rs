//! Extraction error types
//!
//! Failure signals surfaced by the document processor. Each one names the
//! stage that failed; the HTTP layer maps them to status codes.

use thiserror::Error;

use crate::ocr::OcrError;

/// Document processing error type
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Declared page count is above the configured maximum
    #[error("PDF has {actual} pages, exceeding the maximum of {limit}")]
    PageLimitExceeded { actual: usize, limit: usize },

    /// Document could not be opened or its structure is unreadable
    #[error("Failed to open document: {0}")]
    DocumentOpenFailed(String),

    /// A page opened but its text or raster could not be produced
    #[error("Failed to read page {page}: {reason}")]
    PageUnreadable { page: usize, reason: String },

    /// OCR engine failed on a page without a text layer
    #[error("OCR engine failed: {0}")]
    OcrEngineFailed(String),
}

/// Result type alias for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;

impl From<OcrError> for ExtractError {
    fn from(err: OcrError) -> Self {
        ExtractError::OcrEngineFailed(err.to_string())
    }
}

impl ExtractError {
    /// Short machine-readable name of the failed stage
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PageLimitExceeded { .. } => "page_limit_exceeded",
            Self::DocumentOpenFailed(_) => "document_open_failed",
            Self::PageUnreadable { .. } => "page_unreadable",
            Self::OcrEngineFailed(_) => "ocr_engine_failed",
        }
    }
}
