//! MuPDF implementation of the document traits
//!
//! Opens a fresh `mupdf::Document` per processing call. Handles are released
//! when `close` drops them; nothing is cached between calls.

use std::path::Path;

use image::RgbImage;
use mupdf::{Colorspace, Document, Matrix, Page, Pixmap};

use super::stext::{decode_text_page, StextOptions};
use crate::extraction::{
    DocumentBackend, ExtractError, OpenDocument, PageSource, Result, StructuredPage,
};

/// Document backend built on MuPDF
#[derive(Debug, Clone, Default)]
pub struct MupdfBackend {
    options: StextOptions,
}

impl MupdfBackend {
    pub fn new(options: StextOptions) -> Self {
        Self { options }
    }
}

impl DocumentBackend for MupdfBackend {
    fn name(&self) -> &str {
        "mupdf"
    }

    fn open(&self, path: &Path) -> Result<Box<dyn OpenDocument + '_>> {
        let path_str = path.to_string_lossy();
        let document = Document::open(&*path_str)
            .map_err(|e| ExtractError::DocumentOpenFailed(e.to_string()))?;

        let count = document
            .page_count()
            .map_err(|e| ExtractError::DocumentOpenFailed(e.to_string()))?;
        let page_count = usize::try_from(count).map_err(|_| {
            ExtractError::DocumentOpenFailed(format!("invalid page count {}", count))
        })?;

        Ok(Box::new(MupdfDocument {
            document,
            page_count,
            options: &self.options,
        }))
    }
}

struct MupdfDocument<'a> {
    document: Document,
    page_count: usize,
    options: &'a StextOptions,
}

impl OpenDocument for MupdfDocument<'_> {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn load_page(&self, index: usize) -> Result<Box<dyn PageSource + '_>> {
        let number = index + 1;
        let page = self
            .document
            .load_page(index as i32)
            .map_err(|e| ExtractError::PageUnreadable {
                page: number,
                reason: e.to_string(),
            })?;

        Ok(Box::new(MupdfPage {
            page,
            number,
            options: self.options,
        }))
    }

    fn close(self: Box<Self>) -> Result<()> {
        tracing::debug!("Closing MuPDF document ({} pages)", self.page_count);
        drop(self);
        Ok(())
    }
}

struct MupdfPage<'a> {
    page: Page,
    number: usize,
    options: &'a StextOptions,
}

impl MupdfPage<'_> {
    fn unreadable(&self, e: impl std::fmt::Display) -> ExtractError {
        ExtractError::PageUnreadable {
            page: self.number,
            reason: e.to_string(),
        }
    }
}

impl PageSource for MupdfPage<'_> {
    fn structured_text(&self) -> Result<StructuredPage> {
        let bounds = self.page.bounds().map_err(|e| self.unreadable(e))?;
        let text_page = self
            .page
            .to_text_page(self.options.to_mupdf_options())
            .map_err(|e| self.unreadable(e))?;

        Ok(decode_text_page(
            &text_page,
            bounds.x1 - bounds.x0,
            bounds.y1 - bounds.y0,
        ))
    }

    fn rasterize(&self) -> Result<RgbImage> {
        // Identity transform: one pixel per page-space unit (72 dpi)
        let matrix = Matrix::new_scale(1.0, 1.0);
        let colorspace = Colorspace::device_rgb();
        let pixmap = self
            .page
            .to_pixmap(&matrix, &colorspace, false, true)
            .map_err(|e| self.unreadable(e))?;

        pixmap_to_rgb(&pixmap).ok_or_else(|| self.unreadable("pixmap has an unexpected layout"))
    }
}

/// Copy a pixmap's samples into an RGB image, dropping any alpha channel
fn pixmap_to_rgb(pixmap: &Pixmap) -> Option<RgbImage> {
    let width = pixmap.width() as u32;
    let height = pixmap.height() as u32;
    let samples = pixmap.samples();
    let n = pixmap.n() as usize;
    if n < 3 {
        return None;
    }

    let mut rgb = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height as usize {
        for x in 0..width as usize {
            let offset = (y * width as usize + x) * n;
            rgb.extend_from_slice(samples.get(offset..offset + 3)?);
        }
    }

    RgbImage::from_raw(width, height, rgb)
}
