use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    domain::take::{TakeService, TakeStatus, TakeSummary},
    error::{AppError, AppResult},
};

/// Longest text accepted per language field
const MAX_TEXT_CHARS: usize = 5000;

/// Request for POST /api/speech
#[derive(Debug, Serialize, Deserialize)]
pub struct SpeechRequest {
    #[serde(default)]
    pub thai_text: String,
    #[serde(default)]
    pub english_text: String,
    pub voice_profile_id: String,
}

pub struct SpeechController {
    take_service: Arc<TakeService>,
}

impl SpeechController {
    pub fn new(take_service: Arc<TakeService>) -> Self {
        Self { take_service }
    }

    /// POST /api/speech - Generate a new take from bilingual text
    pub async fn generate(
        State(controller): State<Arc<SpeechController>>,
        Json(request): Json<SpeechRequest>,
    ) -> AppResult<Json<TakeSummary>> {
        if request.thai_text.chars().count() > MAX_TEXT_CHARS
            || request.english_text.chars().count() > MAX_TEXT_CHARS
        {
            return Err(AppError::BadRequest(format!(
                "Text must be {} characters or less",
                MAX_TEXT_CHARS
            )));
        }

        let summary = controller
            .take_service
            .generate(
                &request.thai_text,
                &request.english_text,
                &request.voice_profile_id,
            )
            .await?;

        Ok(Json(summary))
    }

    /// GET /api/take - Current take and whether a generation is outstanding
    pub async fn get_take(State(controller): State<Arc<SpeechController>>) -> Json<TakeStatus> {
        Json(controller.take_service.status().await)
    }

    /// GET /api/take/wav - Download the current take as a WAV file
    pub async fn download_wav(
        State(controller): State<Arc<SpeechController>>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let export = controller.take_service.export_wav().await?;

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/wav"));
        headers.insert(
            header::CONTENT_DISPOSITION,
            HeaderValue::from_str(&format!("attachment; filename=\"{}\"", export.file_name))
                .map_err(|e| AppError::Internal(e.to_string()))?,
        );

        Ok((StatusCode::OK, headers, Body::from(export.bytes)))
    }
}
