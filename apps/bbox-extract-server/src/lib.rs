//! bbox-extract server library
//!
//! Extracts line-level text records with bounding boxes from PDF documents.
//! Pages with a native text layer are read directly through MuPDF; pages
//! without one are rasterized and OCR'd with Tesseract.
//!
//! # Modules
//!
//! - `extraction`: Line merging, page routing and the document pipeline
//! - `mupdf`: MuPDF-backed document backend
//! - `ocr`: OCR engines (Tesseract CLI or libtesseract)
//! - `download`: Fetching PDFs into temporary artifacts
//! - `routes`: HTTP API

pub mod config;
pub mod download;
pub mod error;
pub mod extraction;
pub mod mupdf;
pub mod ocr;
pub mod ratelimit;
pub mod routes;
pub mod state;
