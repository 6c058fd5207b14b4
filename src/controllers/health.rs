use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::domain::take::TakeService;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(take_service): State<Arc<TakeService>>) -> impl IntoResponse {
    let status = take_service.status().await;
    let audio_output = take_service.output_name().await;

    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "speech": if status.generating { "busy" } else { "available" },
            "audio_output": audio_output
        })),
    )
}
