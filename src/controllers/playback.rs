use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    domain::{
        take::TakeService,
        transport::{TransportProgress, TransportState},
    },
    error::AppResult,
};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PlayRequest {
    #[serde(default)]
    pub offset_secs: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SeekRequest {
    pub position_secs: f64,
}

#[derive(Debug, Serialize)]
pub struct PlaybackResponse {
    pub state: TransportState,
    pub position_secs: f64,
    pub duration_secs: f64,
    /// How often clients should poll while playing
    pub poll_interval_ms: u64,
}

pub struct PlaybackController {
    take_service: Arc<TakeService>,
    poll_interval_ms: u64,
}

impl PlaybackController {
    pub fn new(take_service: Arc<TakeService>, poll_interval_ms: u64) -> Self {
        Self {
            take_service,
            poll_interval_ms,
        }
    }

    fn respond(&self, progress: TransportProgress) -> Json<PlaybackResponse> {
        Json(PlaybackResponse {
            state: progress.state,
            position_secs: progress.position_secs,
            duration_secs: progress.duration_secs,
            poll_interval_ms: self.poll_interval_ms,
        })
    }

    /// GET /api/playback - Poll transport state and elapsed time
    pub async fn get_status(
        State(controller): State<Arc<PlaybackController>>,
    ) -> Json<PlaybackResponse> {
        let progress = controller.take_service.progress().await;
        controller.respond(progress)
    }

    /// POST /api/playback/play - Start or resume playback
    pub async fn play(
        State(controller): State<Arc<PlaybackController>>,
        body: Option<Json<PlayRequest>>,
    ) -> AppResult<Json<PlaybackResponse>> {
        let request = body.map(|Json(r)| r).unwrap_or_default();
        let progress = controller.take_service.play(request.offset_secs).await?;
        Ok(controller.respond(progress))
    }

    /// POST /api/playback/stop - Stop and keep the position
    pub async fn stop(
        State(controller): State<Arc<PlaybackController>>,
    ) -> Json<PlaybackResponse> {
        let progress = controller.take_service.stop().await;
        controller.respond(progress)
    }

    /// POST /api/playback/seek - Move the playhead
    pub async fn seek(
        State(controller): State<Arc<PlaybackController>>,
        Json(request): Json<SeekRequest>,
    ) -> AppResult<Json<PlaybackResponse>> {
        let progress = controller.take_service.seek(request.position_secs).await?;
        Ok(controller.respond(progress))
    }
}
