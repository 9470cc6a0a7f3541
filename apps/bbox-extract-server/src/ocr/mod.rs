//! OCR Module
//!
//! Recognizes words on rasterized pages that have no native text layer.
//!
//! Supports two Tesseract backends:
//! - `TesseractCli`: runs the `tesseract` binary (default)
//! - `TesseractLib`: links libtesseract in-process (feature `ocr-tesseract`)
//!
//! Both produce word-level `OcrToken`s in the order the engine reports them.

mod provider;
mod tsv;
mod types;

pub use provider::{tokens_to_blocks, OcrEngine, TesseractCli};
pub use tsv::parse_tsv;
pub use types::{OcrError, OcrToken};

#[cfg(feature = "ocr-tesseract")]
pub use provider::TesseractLib;

#[cfg(test)]
pub use provider::{token, MockEngine};
