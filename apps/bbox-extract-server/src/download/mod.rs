//! Document download
//!
//! Fetches a PDF over HTTP, validates its content type and size, and
//! materializes it into a per-request [`TempArtifact`].

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;

use crate::extraction::TempArtifact;

/// Download error types
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to download PDF: {0}")]
    DownloadFailed(String),

    #[error("Invalid content type: {0}. Expected PDF.")]
    InvalidContentType(String),

    #[error("PDF size exceeds maximum allowed size of {}MB", .limit / 1_048_576)]
    SizeExceeded { limit: u64 },

    #[error("Failed to save PDF: {0}")]
    Storage(String),
}

impl DownloadError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidUrl(_) => "invalid_url",
            Self::DownloadFailed(_) => "download_failed",
            Self::InvalidContentType(_) => "invalid_content_type",
            Self::SizeExceeded { .. } => "size_exceeded",
            Self::Storage(_) => "storage_error",
        }
    }
}

/// Fetches a document and stores it in a temporary artifact
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<TempArtifact, DownloadError>;
}

/// Parse and validate a document URL (http or https only)
pub fn parse_url(raw: &str) -> Result<Url, DownloadError> {
    let url = Url::parse(raw.trim()).map_err(|e| DownloadError::InvalidUrl(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(DownloadError::InvalidUrl(format!(
            "unsupported scheme '{}'",
            other
        ))),
    }
}

/// Accept PDF and generic binary content types
pub fn validate_content_type(content_type: &str) -> Result<(), DownloadError> {
    let lowered = content_type.to_lowercase();
    if lowered.contains("pdf") || lowered.contains("octet-stream") {
        Ok(())
    } else {
        Err(DownloadError::InvalidContentType(lowered))
    }
}

fn check_size(size: u64, limit: u64) -> Result<(), DownloadError> {
    if size > limit {
        Err(DownloadError::SizeExceeded { limit })
    } else {
        Ok(())
    }
}

/// HTTP fetcher backed by reqwest
pub struct HttpFetcher {
    client: reqwest::Client,
    max_bytes: u64,
    temp_dir: PathBuf,
}

impl HttpFetcher {
    pub fn new(max_bytes: u64, temp_dir: PathBuf, timeout: Duration) -> Result<Self, DownloadError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DownloadError::DownloadFailed(e.to_string()))?;

        Ok(Self {
            client,
            max_bytes,
            temp_dir,
        })
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<TempArtifact, DownloadError> {
        tracing::info!("Downloading PDF from {}", url);

        let mut response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| DownloadError::DownloadFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::DownloadFailed(format!(
                "server returned {}",
                status
            )));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        validate_content_type(&content_type)?;

        if let Some(length) = response.content_length() {
            check_size(length, self.max_bytes)?;
        }

        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| DownloadError::DownloadFailed(e.to_string()))?
        {
            body.extend_from_slice(&chunk);
            check_size(body.len() as u64, self.max_bytes)?;
        }

        tracing::debug!("Downloaded {} bytes ({})", body.len(), content_type);

        let dir = self.temp_dir.clone();
        tokio::task::spawn_blocking(move || TempArtifact::persist(&body, &dir))
            .await
            .map_err(|e| DownloadError::Storage(format!("Task join error: {}", e)))?
            .map_err(|e| DownloadError::Storage(e.to_string()))
    }
}
