//! OCR Types

use serde::Serialize;

/// A single recognized word with its pixel position (origin top-left)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OcrToken {
    /// Recognized text, untrimmed as reported by the engine
    pub text: String,
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    /// Confidence score (0-100, -1 for non-word rows)
    pub confidence: f32,
}

/// OCR error types
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("OCR engine not available: {0}")]
    NotAvailable(String),

    #[error("Failed to encode page image: {0}")]
    ImageEncoding(String),

    #[error("OCR processing failed: {0}")]
    Processing(String),

    #[error("Failed to parse OCR output at line {line}: {reason}")]
    Parse { line: usize, reason: String },
}
