use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use pr_voice_backend::domain::voice::VoiceType;
use pr_voice_backend::infrastructure::repositories::SpeechRepository;
use std::sync::Mutex;

/// In-memory stand-in for the Gemini API
pub struct StubSpeechRepository {
    response: Mutex<Result<Option<String>, String>>,
    calls: Mutex<Vec<(String, VoiceType)>>,
}

#[allow(dead_code)]
impl StubSpeechRepository {
    pub fn new() -> Self {
        Self {
            response: Mutex::new(Ok(Some(pcm_payload(24_000)))),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answer with `samples` mono samples of a triangle wave
    pub fn respond_with_samples(&self, samples: usize) {
        *self.response.lock().unwrap() = Ok(Some(pcm_payload(samples)));
    }

    pub fn respond_with_raw(&self, bytes: &[u8]) {
        *self.response.lock().unwrap() = Ok(Some(general_purpose::STANDARD.encode(bytes)));
    }

    pub fn respond_empty(&self) {
        *self.response.lock().unwrap() = Ok(None);
    }

    pub fn fail_with(&self, message: &str) {
        *self.response.lock().unwrap() = Err(message.to_string());
    }

    pub fn calls(&self) -> Vec<(String, VoiceType)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechRepository for StubSpeechRepository {
    async fn synthesize(&self, prompt: &str, voice: VoiceType) -> Result<Option<String>, String> {
        self.calls.lock().unwrap().push((prompt.to_string(), voice));
        self.response.lock().unwrap().clone()
    }
}

pub fn pcm_payload(samples: usize) -> String {
    let bytes: Vec<u8> = (0..samples)
        .flat_map(|i| ((((i % 200) as i32 - 100) * 300) as i16).to_le_bytes())
        .collect();
    general_purpose::STANDARD.encode(bytes)
}
