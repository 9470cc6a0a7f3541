//! Text extraction route
//!
//! `POST /api/v1/extract` downloads the PDF at the given URL and returns
//! every text record found in it, one per line, with page-space bounding
//! boxes. Pages without a native text layer are OCR'd.

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::download::parse_url;
use crate::error::{AppError, Result};
use crate::extraction::TextBlock;
use crate::state::AppState;

/// Create the extract router
pub fn router() -> Router<AppState> {
    Router::new().route("/extract", post(extract_pdf))
}

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub blocks: Vec<TextBlock>,
}

async fn extract_pdf(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>> {
    state.rate_limiter().check(Instant::now())?;

    let request_id = Uuid::new_v4();
    let url = parse_url(&request.url)?;
    tracing::info!("[{}] Extracting {}", request_id, url);

    let limits = &state.config().limits;
    let work = async {
        let artifact = state.fetcher().fetch(&url).await?;
        let processor = Arc::clone(state.processor());

        // The blocking task owns the artifact and deletes it even if the
        // caller stops waiting.
        let blocks = tokio::task::spawn_blocking(move || processor.process(artifact))
            .await
            .map_err(|e| AppError::Internal(format!("processing task failed: {}", e)))??;

        Ok::<_, AppError>(blocks)
    };

    let blocks = tokio::time::timeout(limits.processing_timeout(), work)
        .await
        .map_err(|_| AppError::Timeout(limits.processing_timeout))??;

    tracing::info!("[{}] Extracted {} block(s)", request_id, blocks.len());

    Ok(Json(ExtractResponse { blocks }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::download::{DocumentFetcher, DownloadError};
    use crate::error::ErrorResponse;
    use crate::extraction::testing::StaticBackend;
    use crate::extraction::{DocumentProcessor, TempArtifact};
    use crate::ocr::{token, MockEngine, OcrEngine};
    use crate::routes::app;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use parking_lot::Mutex;
    use reqwest::Url;
    use std::path::PathBuf;
    use tower::ServiceExt;

    /// Serves a fixed payload and remembers where each artifact was stored
    struct StaticFetcher {
        dir: tempfile::TempDir,
        stored: Mutex<Vec<PathBuf>>,
    }

    impl StaticFetcher {
        fn new() -> Self {
            Self {
                dir: tempfile::tempdir().unwrap(),
                stored: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl DocumentFetcher for StaticFetcher {
        async fn fetch(&self, _url: &Url) -> std::result::Result<TempArtifact, DownloadError> {
            let artifact = TempArtifact::persist(b"%PDF-1.7\n", self.dir.path())
                .map_err(|e| DownloadError::Storage(e.to_string()))?;
            self.stored.lock().push(artifact.path().to_path_buf());
            Ok(artifact)
        }
    }

    struct Harness {
        fetcher: Arc<StaticFetcher>,
        ocr: Arc<MockEngine>,
        state: AppState,
    }

    fn harness(
        pages: Vec<Option<&'static str>>,
        ocr: MockEngine,
        configure: impl FnOnce(&mut Config),
    ) -> Harness {
        let mut config = Config::default();
        config.limits.max_requests_per_second = 0;
        configure(&mut config);

        let fetcher = Arc::new(StaticFetcher::new());
        let ocr = Arc::new(ocr);
        let processor = DocumentProcessor::new(
            Arc::new(StaticBackend { pages }),
            Arc::clone(&ocr) as Arc<dyn OcrEngine>,
            config.limits.max_pages,
        );
        let state = AppState::from_parts(
            config,
            Arc::clone(&fetcher) as Arc<dyn DocumentFetcher>,
            processor,
        );

        Harness { fetcher, ocr, state }
    }

    fn extract_request(url: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/extract")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::json!({ "url": url }).to_string()))
            .unwrap()
    }

    async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_extract_mixed_document() {
        let h = harness(
            vec![Some("Hello World"), None],
            MockEngine::returning(vec![token("Scanned", 5, 5, 50, 12)]),
            |_| {},
        );

        let (status, body) = send(&h.state, extract_request("https://example.com/a.pdf")).await;
        assert_eq!(status, StatusCode::OK);

        let response: ExtractResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(response.blocks.len(), 2);
        assert_eq!(response.blocks[0].text, "Hello World");
        assert_eq!(response.blocks[0].bbox.to_array(), [10.0, 10.0, 90.0, 20.0]);
        assert_eq!(response.blocks[0].page, 1);
        assert_eq!(response.blocks[1].text, "Scanned");
        assert_eq!(response.blocks[1].page, 2);
        assert_eq!(h.ocr.call_count(), 1);

        let stored = h.fetcher.stored.lock();
        assert_eq!(stored.len(), 1);
        assert!(!stored[0].exists());
    }

    #[tokio::test]
    async fn test_response_shape() {
        let h = harness(vec![Some("Hello World")], MockEngine::returning(vec![]), |_| {});

        let (_, body) = send(&h.state, extract_request("https://example.com/a.pdf")).await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "blocks": [
                    { "text": "Hello World", "bbox": [10.0, 10.0, 90.0, 20.0], "page": 1 }
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_page_limit_is_bad_request() {
        let h = harness(
            vec![Some("one"), Some("two"), Some("three")],
            MockEngine::returning(vec![]),
            |config| config.limits.max_pages = 2,
        );

        let (status, body) = send(&h.state, extract_request("https://example.com/a.pdf")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.error, "page_limit_exceeded");
        assert_eq!(error.message, "PDF has 3 pages, exceeding the maximum of 2");
        assert!(!h.fetcher.stored.lock()[0].exists());
    }

    #[tokio::test]
    async fn test_ocr_failure_is_server_error() {
        let h = harness(vec![None], MockEngine::failing(), |_| {});

        let (status, body) = send(&h.state, extract_request("https://example.com/a.pdf")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.error, "ocr_engine_failed");
        assert!(!h.fetcher.stored.lock()[0].exists());
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected_before_download() {
        let h = harness(vec![Some("x")], MockEngine::returning(vec![]), |_| {});

        let (status, body) = send(&h.state, extract_request("ftp://example.com/a.pdf")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.error, "invalid_url");
        assert!(h.fetcher.stored.lock().is_empty());
    }

    #[tokio::test]
    async fn test_second_request_is_rate_limited() {
        let h = harness(vec![Some("x")], MockEngine::returning(vec![]), |config| {
            config.limits.max_requests_per_second = 1
        });

        let (first, _) = send(&h.state, extract_request("https://example.com/a.pdf")).await;
        assert_eq!(first, StatusCode::OK);

        let (second, body) = send(&h.state, extract_request("https://example.com/a.pdf")).await;
        assert_eq!(second, StatusCode::TOO_MANY_REQUESTS);

        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.error, "rate_limited");
        assert_eq!(h.fetcher.stored.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_health_reports_limits() {
        let h = harness(vec![], MockEngine::returning(vec![]), |config| {
            config.limits.max_pages = 10
        });

        let request = Request::builder()
            .uri("/api/v1/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&h.state, request).await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["max_pages"], 10);
    }
}
