use super::error::SpeechServiceError;
use crate::domain::voice::VoiceProfile;
use crate::infrastructure::repositories::SpeechRepository;
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use regex::Regex;
use std::sync::{Arc, LazyLock};

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

pub struct SpeechService {
    speech_repo: Arc<dyn SpeechRepository>,
}

impl SpeechService {
    pub fn new(speech_repo: Arc<dyn SpeechRepository>) -> Self {
        Self { speech_repo }
    }
}

#[async_trait]
pub trait SpeechServiceApi: Send + Sync {
    /// Request a bilingual announcement in the given persona
    ///
    /// This operation:
    /// - Builds the persona instruction prompt from both text segments
    /// - Calls the speech repository with the profile's prebuilt voice
    /// - Decodes the base64 payload
    ///
    /// Returns the raw 16-bit PCM bytes exactly as the provider produced them
    async fn request_speech(
        &self,
        thai_text: &str,
        english_text: &str,
        profile: &VoiceProfile,
    ) -> Result<Vec<u8>, SpeechServiceError>;
}

#[async_trait]
impl SpeechServiceApi for SpeechService {
    async fn request_speech(
        &self,
        thai_text: &str,
        english_text: &str,
        profile: &VoiceProfile,
    ) -> Result<Vec<u8>, SpeechServiceError> {
        let prompt = build_prompt(thai_text, english_text, profile);

        tracing::info!(
            voice_profile_id = %profile.id,
            voice = %profile.voice,
            thai_length = thai_text.len(),
            english_length = english_text.len(),
            "Speech request"
        );

        let payload = self
            .speech_repo
            .synthesize(&prompt, profile.voice)
            .await
            .map_err(SpeechServiceError::Upstream)?
            .ok_or(SpeechServiceError::EmptyResponse)?;

        let audio = general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| SpeechServiceError::InvalidPayload(e.to_string()))?;

        tracing::info!(
            voice_profile_id = %profile.id,
            audio_size = audio.len(),
            "Speech audio received"
        );

        Ok(audio)
    }
}

/// Instruction text sent to the model for one announcement
pub fn build_prompt(thai_text: &str, english_text: &str, profile: &VoiceProfile) -> String {
    format!(
        "Please speak the following PR announcement naturally using the persona: {}\nThai part: {}\nEnglish part: {}",
        profile.prompt_instruction,
        normalize_text(thai_text),
        normalize_text(english_text)
    )
}

/// Trim and collapse whitespace runs (including newlines) to single spaces
pub fn normalize_text(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}
