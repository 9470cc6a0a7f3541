//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::download::{DocumentFetcher, DownloadError, HttpFetcher};
use crate::extraction::DocumentProcessor;
use crate::mupdf::{MupdfBackend, StextOptions};
use crate::ocr::OcrEngine;
use crate::ratelimit::RateLimiter;

/// Error type for state initialization
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Failed to initialize HTTP client: {0}")]
    HttpClient(#[from] DownloadError),
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    fetcher: Arc<dyn DocumentFetcher>,
    processor: Arc<DocumentProcessor>,
    rate_limiter: RateLimiter,
}

impl AppState {
    /// Create the production state: reqwest downloads, MuPDF documents,
    /// Tesseract OCR.
    pub fn new(config: Config) -> Result<Self, StateError> {
        let fetcher = HttpFetcher::new(
            config.limits.max_pdf_size,
            config.extraction.temp_dir.clone(),
            config.limits.download_timeout(),
        )?;

        let backend = MupdfBackend::new(StextOptions {
            preserve_images: config.extraction.preserve_image_blocks,
            ..Default::default()
        });

        let processor = DocumentProcessor::new(
            Arc::new(backend),
            build_ocr_engine(&config),
            config.limits.max_pages,
        );

        Ok(Self::from_parts(config, Arc::new(fetcher), processor))
    }

    /// Assemble state from explicit collaborators
    pub fn from_parts(
        config: Config,
        fetcher: Arc<dyn DocumentFetcher>,
        processor: DocumentProcessor,
    ) -> Self {
        let rate_limiter = RateLimiter::new(config.limits.max_requests_per_second);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                fetcher,
                processor: Arc::new(processor),
                rate_limiter,
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn fetcher(&self) -> &Arc<dyn DocumentFetcher> {
        &self.inner.fetcher
    }

    pub fn processor(&self) -> &Arc<DocumentProcessor> {
        &self.inner.processor
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.inner.rate_limiter
    }
}

#[cfg(feature = "ocr-tesseract")]
fn build_ocr_engine(config: &Config) -> Arc<dyn OcrEngine> {
    use crate::ocr::TesseractLib;

    tracing::info!("OCR engine: libtesseract ({})", config.ocr.language);
    Arc::new(TesseractLib::new(
        config.ocr.datapath.as_deref(),
        &config.ocr.language,
    ))
}

#[cfg(not(feature = "ocr-tesseract"))]
fn build_ocr_engine(config: &Config) -> Arc<dyn OcrEngine> {
    use crate::ocr::TesseractCli;

    let engine = TesseractCli::new(
        &config.ocr.command,
        &config.ocr.language,
        config.ocr.psm,
        config.extraction.temp_dir.clone(),
    );
    if engine.is_available() {
        tracing::info!("OCR engine: {} ({})", config.ocr.command, config.ocr.language);
    } else {
        tracing::warn!(
            "'{}' is not runnable; pages without a text layer will fail OCR",
            config.ocr.command
        );
    }
    Arc::new(engine)
}
