use super::speech_repository::SpeechRepository;
use crate::domain::voice::VoiceType;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<String>,
    speech_config: SpeechConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig {
    voice_config: VoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig {
    prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig {
    voice_name: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: Option<String>,
    data: Option<String>,
}

/// Base64 audio found in a response, with the format the model declared
#[derive(Debug, PartialEq)]
struct InlineAudio {
    mime_type: Option<String>,
    data: String,
}

impl GenerateContentResponse {
    /// First candidate, first part, inline audio data
    fn into_audio_payload(self) -> Option<InlineAudio> {
        let inline = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .inline_data?;
        let data = inline.data.filter(|d| !d.is_empty())?;
        Some(InlineAudio {
            mime_type: inline.mime_type,
            data,
        })
    }
}

/// Gemini generateContent backed speech repository
pub struct GeminiSpeechRepository {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiSpeechRepository {
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn build_request(prompt: &str, voice: VoiceType) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![TextPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["AUDIO".to_string()],
                speech_config: SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: voice.as_str().to_string(),
                        },
                    },
                },
            },
        }
    }
}

#[async_trait]
impl SpeechRepository for GeminiSpeechRepository {
    async fn synthesize(&self, prompt: &str, voice: VoiceType) -> Result<Option<String>, String> {
        let start_time = std::time::Instant::now();

        tracing::info!(
            model = %self.model,
            voice = %voice,
            prompt_length = prompt.len(),
            "Calling Gemini speech API"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::build_request(prompt, voice))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    model = %self.model,
                    voice = %voice,
                    "Gemini speech API call failed"
                );
                format!("Gemini request error: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status.as_u16(),
                body = %body,
                "Gemini speech API returned an error status"
            );
            return Err(format!("Gemini HTTP error {}: {}", status, body));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| format!("Gemini response parse error: {}", e))?;
        let payload = body.into_audio_payload();

        tracing::info!(
            provider = "gemini",
            model = %self.model,
            voice = %voice,
            latency_ms = start_time.elapsed().as_millis(),
            mime_type = payload
                .as_ref()
                .and_then(|p| p.mime_type.as_deref())
                .unwrap_or("none"),
            payload_size = payload.as_ref().map(|p| p.data.len()).unwrap_or(0),
            "Gemini speech synthesis completed"
        );

        Ok(payload.map(|p| p.data))
    }
}
