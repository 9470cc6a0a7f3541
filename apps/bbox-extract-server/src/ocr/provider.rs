//! OCR Engines
//!
//! Defines the engine trait and the Tesseract implementations.

use std::path::PathBuf;
use std::process::Command;

use image::RgbImage;

use super::tsv::parse_tsv;
use super::types::{OcrError, OcrToken};
use crate::extraction::{BoundingBox, PageBlock};

/// OCR engine trait
///
/// Engines are called from the blocking document-processing thread, one page
/// at a time.
pub trait OcrEngine: Send + Sync {
    /// Engine name (for diagnostics)
    fn name(&self) -> &str;

    /// Recognize words on an RGB page raster
    fn recognize(&self, image: &RgbImage) -> Result<Vec<OcrToken>, OcrError>;
}

/// Convert OCR tokens into page records.
///
/// Tokens whose trimmed text is empty are dropped; the rest keep engine order.
pub fn tokens_to_blocks(tokens: Vec<OcrToken>) -> Vec<PageBlock> {
    tokens
        .into_iter()
        .filter_map(|token| {
            let text = token.text.trim();
            if text.is_empty() {
                return None;
            }
            Some(PageBlock {
                text: text.to_string(),
                bbox: BoundingBox::from_origin_size(
                    token.left as f32,
                    token.top as f32,
                    token.width as f32,
                    token.height as f32,
                ),
            })
        })
        .collect()
}

/// Tesseract OCR via the command-line binary
pub struct TesseractCli {
    command: String,
    language: String,
    psm: u8,
    temp_dir: PathBuf,
}

impl TesseractCli {
    pub fn new(command: &str, language: &str, psm: u8, temp_dir: PathBuf) -> Self {
        Self {
            command: command.to_string(),
            language: language.to_string(),
            psm,
            temp_dir,
        }
    }

    /// Check if the tesseract binary can be executed
    pub fn is_available(&self) -> bool {
        Command::new(&self.command)
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

impl OcrEngine for TesseractCli {
    fn name(&self) -> &str {
        "tesseract-cli"
    }

    fn recognize(&self, image: &RgbImage) -> Result<Vec<OcrToken>, OcrError> {
        // Removed when dropped, on every path out of this function
        let input = tempfile::Builder::new()
            .prefix("bbox-ocr-")
            .suffix(".png")
            .tempfile_in(&self.temp_dir)
            .map_err(|e| OcrError::ImageEncoding(format!("Failed to create temp file: {}", e)))?;

        image
            .save_with_format(input.path(), image::ImageFormat::Png)
            .map_err(|e| OcrError::ImageEncoding(e.to_string()))?;

        let output = Command::new(&self.command)
            .arg(input.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .arg("--psm")
            .arg(self.psm.to_string())
            .arg("tsv")
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    OcrError::NotAvailable(format!("'{}' not found on PATH", self.command))
                } else {
                    OcrError::Processing(format!("Failed to run tesseract: {}", e))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Processing(format!(
                "Tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let tokens = parse_tsv(&String::from_utf8_lossy(&output.stdout))?;
        tracing::debug!(
            "tesseract recognized {} rows on {}x{} raster",
            tokens.len(),
            image.width(),
            image.height()
        );
        Ok(tokens)
    }
}

/// Tesseract OCR linked in-process
#[cfg(feature = "ocr-tesseract")]
pub struct TesseractLib {
    datapath: Option<String>,
    language: String,
}

#[cfg(feature = "ocr-tesseract")]
impl TesseractLib {
    pub fn new(datapath: Option<&str>, language: &str) -> Self {
        Self {
            datapath: datapath.map(str::to_string),
            language: language.to_string(),
        }
    }
}

#[cfg(feature = "ocr-tesseract")]
impl OcrEngine for TesseractLib {
    fn name(&self) -> &str {
        "tesseract-lib"
    }

    fn recognize(&self, image: &RgbImage) -> Result<Vec<OcrToken>, OcrError> {
        let (width, height) = image.dimensions();

        let mut api = tesseract::Tesseract::new(self.datapath.as_deref(), Some(&self.language))
            .map_err(|e| OcrError::NotAvailable(e.to_string()))?
            .set_frame(
                image.as_raw(),
                width as i32,
                height as i32,
                3,
                3 * width as i32,
            )
            .map_err(|e| OcrError::ImageEncoding(e.to_string()))?
            .recognize()
            .map_err(|e| OcrError::Processing(e.to_string()))?;

        let tsv = api
            .get_tsv_text(0)
            .map_err(|e| OcrError::Processing(e.to_string()))?;

        parse_tsv(&tsv)
    }
}

/// Mock engine for testing
#[cfg(test)]
pub struct MockEngine {
    pub tokens: Vec<OcrToken>,
    pub fail: bool,
    pub calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MockEngine {
    pub fn returning(tokens: Vec<OcrToken>) -> Self {
        Self {
            tokens,
            fail: false,
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            tokens: Vec::new(),
            fail: true,
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
impl OcrEngine for MockEngine {
    fn name(&self) -> &str {
        "mock"
    }

    fn recognize(&self, _image: &RgbImage) -> Result<Vec<OcrToken>, OcrError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if self.fail {
            return Err(OcrError::Processing("mock failure".into()));
        }
        Ok(self.tokens.clone())
    }
}

#[cfg(test)]
pub fn token(text: &str, left: i32, top: i32, width: i32, height: i32) -> OcrToken {
    OcrToken {
        text: text.to_string(),
        left,
        top,
        width,
        height,
        confidence: 90.0,
    }
}
