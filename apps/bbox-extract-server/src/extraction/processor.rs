//! Document processing
//!
//! Opens a materialized document, enforces the page limit, runs every page
//! through [`process_page`] in order and tags the results with page numbers.
//!
//! # Cleanup
//!
//! The open document handle and the temporary artifact are owned by a
//! [`ProcessingScope`]. Its `Drop` releases both exactly once on every exit
//! path. Cleanup failures are logged and never replace the processing
//! outcome.

use std::path::Path;
use std::sync::Arc;

use super::artifact::TempArtifact;
use super::error::{ExtractError, Result};
use super::page::{process_page, PageSource};
use super::types::TextBlock;
use crate::ocr::OcrEngine;

/// Opens documents from a path
pub trait DocumentBackend: Send + Sync {
    /// Backend name (for diagnostics)
    fn name(&self) -> &str;

    /// Open the document at `path`
    fn open(&self, path: &Path) -> Result<Box<dyn OpenDocument + '_>>;
}

/// An opened document handle
pub trait OpenDocument {
    /// Declared page count
    fn page_count(&self) -> usize;

    /// Load the page at a 0-based index
    fn load_page(&self, index: usize) -> Result<Box<dyn PageSource + '_>>;

    /// Release the handle
    fn close(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}

/// Owns the resources of one processing call and releases them on drop
struct ProcessingScope<'a> {
    document: Option<Box<dyn OpenDocument + 'a>>,
    artifact: Option<TempArtifact>,
}

impl<'a> ProcessingScope<'a> {
    fn new(artifact: TempArtifact) -> Self {
        Self {
            document: None,
            artifact: Some(artifact),
        }
    }

    fn attach(&mut self, document: Box<dyn OpenDocument + 'a>) -> &dyn OpenDocument {
        &**self.document.insert(document)
    }
}

impl Drop for ProcessingScope<'_> {
    fn drop(&mut self) {
        if let Some(document) = self.document.take() {
            if let Err(e) = document.close() {
                tracing::warn!("Failed to close document: {}", e);
            }
        }

        if let Some(artifact) = self.artifact.take() {
            let path = artifact.path().to_path_buf();
            if let Err(e) = artifact.remove() {
                tracing::warn!("Failed to remove temporary file {}: {}", path.display(), e);
            }
        }
    }
}

/// Runs the page pipeline over whole documents
pub struct DocumentProcessor {
    backend: Arc<dyn DocumentBackend>,
    ocr: Arc<dyn OcrEngine>,
    max_pages: usize,
}

impl DocumentProcessor {
    pub fn new(
        backend: Arc<dyn DocumentBackend>,
        ocr: Arc<dyn OcrEngine>,
        max_pages: usize,
    ) -> Self {
        Self {
            backend,
            ocr,
            max_pages,
        }
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    /// Extract every text record of the document stored in `artifact`.
    ///
    /// The artifact is deleted before this returns, whatever the outcome.
    pub fn process(&self, artifact: TempArtifact) -> Result<Vec<TextBlock>> {
        let path = artifact.path().to_path_buf();
        let mut scope = ProcessingScope::new(artifact);

        let document = scope.attach(self.backend.open(&path)?);

        let page_count = document.page_count();
        if page_count > self.max_pages {
            return Err(ExtractError::PageLimitExceeded {
                actual: page_count,
                limit: self.max_pages,
            });
        }

        tracing::info!(
            "Processing {} page(s) from {} with {}",
            page_count,
            path.display(),
            self.backend.name()
        );

        let mut blocks = Vec::new();
        for index in 0..page_count {
            let page = document.load_page(index)?;
            let page_blocks = process_page(page.as_ref(), self.ocr.as_ref())?;
            tracing::debug!("Page {}: {} block(s)", index + 1, page_blocks.len());
            blocks.extend(page_blocks.into_iter().map(|b| b.on_page(index + 1)));
        }

        Ok(blocks)
    }
}
