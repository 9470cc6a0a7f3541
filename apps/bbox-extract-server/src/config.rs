//! Configuration management for the extraction server
//!
//! Values come from the environment (optionally seeded from `.env`);
//! anything unset falls back to the defaults below.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub limits: LimitsConfig,
    pub ocr: OcrConfig,
    pub extraction: ExtractionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum downloaded document size in bytes
    pub max_pdf_size: u64,
    /// Maximum declared page count
    pub max_pages: usize,
    pub max_requests_per_second: u32,
    /// Wall-clock budget for one document, in seconds
    pub processing_timeout: u64,
    /// Download request timeout, in seconds
    pub download_timeout: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    /// Tesseract binary
    pub command: String,
    pub language: String,
    /// Tesseract page segmentation mode
    pub psm: u8,
    /// tessdata directory for the in-process engine
    pub datapath: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    /// Directory for per-request temporary files
    pub temp_dir: PathBuf,
    /// Keep image blocks in structured text (image-only pages then skip OCR)
    pub preserve_image_blocks: bool,
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            limits: LimitsConfig {
                max_pdf_size: 52_428_800,
                max_pages: 2000,
                max_requests_per_second: 1,
                processing_timeout: 75,
                download_timeout: 30,
            },
            ocr: OcrConfig {
                command: "tesseract".to_string(),
                language: "eng".to_string(),
                psm: 3,
                datapath: None,
            },
            extraction: ExtractionConfig {
                temp_dir: env::temp_dir(),
                preserve_image_blocks: false,
            },
        }
    }
}

impl LimitsConfig {
    pub fn processing_timeout(&self) -> Duration {
        Duration::from_secs(self.processing_timeout)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout)
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let text = |key: &str| -> Option<String> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Ok(Config {
            server: ServerConfig {
                host: text("SERVER_HOST").unwrap_or(defaults.server.host),
                port: parsed(&lookup, "SERVER_PORT", defaults.server.port)?,
            },
            limits: LimitsConfig {
                max_pdf_size: parsed(&lookup, "MAX_PDF_SIZE", defaults.limits.max_pdf_size)?,
                max_pages: parsed(&lookup, "MAX_PAGES", defaults.limits.max_pages)?,
                max_requests_per_second: parsed(
                    &lookup,
                    "MAX_REQUESTS_PER_SECOND",
                    defaults.limits.max_requests_per_second,
                )?,
                processing_timeout: parsed(
                    &lookup,
                    "PROCESSING_TIMEOUT",
                    defaults.limits.processing_timeout,
                )?,
                download_timeout: parsed(
                    &lookup,
                    "DOWNLOAD_TIMEOUT",
                    defaults.limits.download_timeout,
                )?,
            },
            ocr: OcrConfig {
                command: text("TESSERACT_CMD").unwrap_or(defaults.ocr.command),
                language: text("OCR_LANGUAGE").unwrap_or(defaults.ocr.language),
                psm: parsed(&lookup, "OCR_PSM", defaults.ocr.psm)?,
                datapath: text("TESSDATA_PREFIX"),
            },
            extraction: ExtractionConfig {
                temp_dir: text("TEMP_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.extraction.temp_dir),
                preserve_image_blocks: parsed(
                    &lookup,
                    "PRESERVE_IMAGE_BLOCKS",
                    defaults.extraction.preserve_image_blocks,
                )?,
            },
        })
    }
}

/// Read and parse `key`, falling back to `default` when unset or blank
fn parsed<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key).map(|v| v.trim().to_string()) {
        None => Ok(default),
        Some(v) if v.is_empty() => Ok(default),
        Some(v) => v.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value: v,
        }),
    }
}
