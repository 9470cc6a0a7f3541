use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    max_pages: usize,
    ocr_language: String,
}

#[derive(Serialize)]
pub struct RootResponse {
    message: &'static str,
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "PDF Processing API is running",
    })
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        max_pages: state.processor().max_pages(),
        ocr_language: state.config().ocr.language.clone(),
    })
}
