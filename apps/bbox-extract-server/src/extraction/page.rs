//! Page processing
//!
//! Per page: try the native text layer, fall back to OCR only when the page
//! exposes no text structure at all.

use image::RgbImage;

use super::error::Result;
use super::text_layer::{extract_text_layer, TextLayer};
use super::types::{PageBlock, StructuredPage};
use crate::ocr::{tokens_to_blocks, OcrEngine};

/// An opened page of a document
pub trait PageSource {
    /// Decode the page's native text structure
    fn structured_text(&self) -> Result<StructuredPage>;

    /// Render the page to an RGB raster at its default resolution
    fn rasterize(&self) -> Result<RgbImage>;
}

/// Process a single page into records without page numbers.
///
/// Visits the page exactly once: text layer first, OCR only on
/// `NoNativeText`. OCR failures propagate.
pub fn process_page(page: &dyn PageSource, ocr: &dyn OcrEngine) -> Result<Vec<PageBlock>> {
    let structured = page.structured_text()?;

    match extract_text_layer(&structured) {
        TextLayer::HasNativeText(blocks) => Ok(blocks),
        TextLayer::NoNativeText => {
            let raster = page.rasterize()?;
            tracing::debug!(
                "No text layer, running {} on {}x{} raster",
                ocr.name(),
                raster.width(),
                raster.height()
            );
            let tokens = ocr.recognize(&raster)?;
            Ok(tokens_to_blocks(tokens))
        }
    }
}
