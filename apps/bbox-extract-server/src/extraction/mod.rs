//! Text and bounding box extraction
//!
//! The page-processing pipeline:
//!
//! ```text
//! DocumentProcessor ─┬─> (per page) process_page ─┬─> extract_text_layer ──> merge_line
//!                    │                            └─> OcrEngine (no text layer)
//!                    └─> ProcessingScope (closes document, deletes temp artifact)
//! ```
//!
//! Document access goes through the [`DocumentBackend`] / [`OpenDocument`] /
//! [`PageSource`] traits; the MuPDF implementation lives in `crate::mupdf`.

mod artifact;
mod error;
mod merge;
mod page;
mod processor;
mod text_layer;
mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use artifact::TempArtifact;
pub use error::{ExtractError, Result};
pub use merge::merge_line;
pub use page::{process_page, PageSource};
pub use processor::{DocumentBackend, DocumentProcessor, OpenDocument};
pub use text_layer::{extract_text_layer, TextLayer};
pub use types::{Block, BoundingBox, Line, PageBlock, Span, StructuredPage, TextBlock};
