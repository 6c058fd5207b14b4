use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::domain::voice::{VoiceProfile, VoiceService};

#[derive(Debug, Serialize)]
pub struct VoiceProfileResponse {
    pub id: String,
    pub label: String,
    pub description: String,
    pub voice: String,
}

impl From<VoiceProfile> for VoiceProfileResponse {
    fn from(profile: VoiceProfile) -> Self {
        Self {
            id: profile.id,
            label: profile.label,
            description: profile.description,
            voice: profile.voice.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub voices: Vec<VoiceProfileResponse>,
}

pub struct VoiceController {
    service: Arc<VoiceService>,
}

impl VoiceController {
    pub fn new(service: Arc<VoiceService>) -> Self {
        Self { service }
    }

    /// GET /api/voices - List the voice catalog in display order
    pub async fn list_voices(
        State(controller): State<Arc<VoiceController>>,
    ) -> Json<VoicesResponse> {
        let voices = controller
            .service
            .get_profiles()
            .into_iter()
            .map(VoiceProfileResponse::from)
            .collect();

        Json(VoicesResponse { voices })
    }
}
