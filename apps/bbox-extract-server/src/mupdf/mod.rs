//! MuPDF document backend
//!
//! Implements the extraction traits on top of the MuPDF library.
//!
//! # Thread Safety
//!
//! MuPDF's `fz_context` is **NOT thread-safe**. A `MupdfBackend` never holds a
//! document: every call to `open` creates a fresh `mupdf::Document` that
//! lives only inside the blocking task processing one request.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bbox_extract_server::mupdf::{MupdfBackend, StextOptions};
//!
//! let backend = MupdfBackend::new(StextOptions::default());
//! let document = backend.open(path)?;
//! let page = document.load_page(0)?;
//! let stext = page.structured_text()?;
//! ```

mod document;
mod stext;

pub use document::MupdfBackend;
pub use stext::{decode_text_page, StextOptions};
