use super::error::TakeServiceError;
use crate::domain::audio::{decode_pcm16, encode_wav, DecodedAudioBuffer};
use crate::domain::speech::SpeechServiceApi;
use crate::domain::transport::{PlaybackTransport, TransportProgress};
use crate::domain::voice::{VoiceProfile, VoiceService};
use crate::infrastructure::audio::AudioOutput;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shown when neither text field has content
pub const EMPTY_TEXT_MESSAGE: &str = "กรุณาใส่ข้อความภาษาไทย หรือ ภาษาอังกฤษ";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TakeSummary {
    pub take_id: u64,
    pub voice_profile_id: String,
    pub sample_rate: u32,
    pub channel_count: usize,
    pub sample_count: usize,
    pub duration_secs: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TakeStatus {
    pub generating: bool,
    pub take: Option<TakeSummary>,
}

#[derive(Debug, Clone)]
pub struct WavExport {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// The one generated recording currently on offer
struct Take {
    id: u64,
    voice_profile_id: String,
    buffer: Arc<DecodedAudioBuffer>,
    created_at: DateTime<Utc>,
}

impl Take {
    fn summary(&self) -> TakeSummary {
        TakeSummary {
            take_id: self.id,
            voice_profile_id: self.voice_profile_id.clone(),
            sample_rate: self.buffer.sample_rate(),
            channel_count: self.buffer.channel_count(),
            sample_count: self.buffer.sample_count(),
            duration_secs: self.buffer.duration_secs(),
            created_at: self.created_at,
        }
    }
}

struct TakeState {
    /// Bumped by every generation request; responses for older values are stale
    generation: u64,
    generating: bool,
    current: Option<Take>,
    transport: PlaybackTransport,
}

/// Owns the current take and its playback transport.
///
/// The state lock is never held across the speech request.
pub struct TakeService {
    speech_service: Arc<dyn SpeechServiceApi>,
    voice_service: Arc<VoiceService>,
    sample_rate: u32,
    channel_count: usize,
    state: Arc<Mutex<TakeState>>,
}

/// Clears the generating flag when a generation request is dropped mid-flight
struct PendingGeneration {
    state: Arc<Mutex<TakeState>>,
    generation: u64,
    armed: bool,
}

impl PendingGeneration {
    fn finish(&mut self) {
        self.armed = false;
    }
}

impl Drop for PendingGeneration {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let generation = self.generation;
        tracing::warn!(generation = generation, "Generation request cancelled");

        match self.state.try_lock() {
            Ok(mut state) => clear_cancelled(&mut state, generation),
            Err(_) => {
                let state = self.state.clone();
                if let Ok(runtime) = tokio::runtime::Handle::try_current() {
                    runtime.spawn(async move {
                        clear_cancelled(&mut *state.lock().await, generation);
                    });
                }
            }
        }
    }
}

fn clear_cancelled(state: &mut TakeState, generation: u64) {
    if state.generation == generation {
        state.generating = false;
    }
}

impl TakeService {
    pub fn new(
        speech_service: Arc<dyn SpeechServiceApi>,
        voice_service: Arc<VoiceService>,
        output: Arc<dyn AudioOutput>,
        sample_rate: u32,
        channel_count: usize,
    ) -> Self {
        Self {
            speech_service,
            voice_service,
            sample_rate,
            channel_count,
            state: Arc::new(Mutex::new(TakeState {
                generation: 0,
                generating: false,
                current: None,
                transport: PlaybackTransport::new(output),
            })),
        }
    }

    /// Generate a new take, replacing the current one.
    ///
    /// A request that is overtaken by a newer one while waiting on the speech
    /// API returns `Superseded` and leaves the newer request's state alone.
    pub async fn generate(
        &self,
        thai_text: &str,
        english_text: &str,
        voice_profile_id: &str,
    ) -> Result<TakeSummary, TakeServiceError> {
        if thai_text.trim().is_empty() && english_text.trim().is_empty() {
            return Err(TakeServiceError::Invalid(EMPTY_TEXT_MESSAGE.to_string()));
        }

        let profile = self
            .voice_service
            .resolve_profile(voice_profile_id)
            .ok_or_else(|| TakeServiceError::Invalid("No voice profiles available".to_string()))?;

        let generation = {
            let mut state = self.state.lock().await;
            state.generation += 1;
            state.generating = true;
            state.current = None;
            state.transport.unload();
            state.generation
        };

        let mut pending = PendingGeneration {
            state: self.state.clone(),
            generation,
            armed: true,
        };

        tracing::info!(
            generation = generation,
            voice_profile_id = %profile.id,
            "Generation started"
        );

        let result = self.synthesize(thai_text, english_text, &profile).await;

        let mut state = self.state.lock().await;
        pending.finish();
        if state.generation != generation {
            tracing::warn!(
                generation = generation,
                current_generation = state.generation,
                succeeded = result.is_ok(),
                "Discarding stale generation response"
            );
            return Err(TakeServiceError::Superseded);
        }
        state.generating = false;

        let buffer = match result {
            Ok(buffer) => Arc::new(buffer),
            Err(e) => {
                tracing::error!(generation = generation, error = %e, "Generation failed");
                return Err(e);
            }
        };

        let take = Take {
            id: generation,
            voice_profile_id: profile.id,
            buffer: buffer.clone(),
            created_at: Utc::now(),
        };
        let summary = take.summary();

        state.transport.load(buffer);
        state.current = Some(take);

        tracing::info!(
            take_id = summary.take_id,
            duration_secs = summary.duration_secs,
            sample_count = summary.sample_count,
            "Take ready"
        );

        Ok(summary)
    }

    pub async fn status(&self) -> TakeStatus {
        let state = self.state.lock().await;
        TakeStatus {
            generating: state.generating,
            take: state.current.as_ref().map(Take::summary),
        }
    }

    pub async fn play(&self, offset_secs: Option<f64>) -> Result<TransportProgress, TakeServiceError> {
        Ok(self.state.lock().await.transport.play(offset_secs)?)
    }

    pub async fn stop(&self) -> TransportProgress {
        self.state.lock().await.transport.stop()
    }

    pub async fn seek(&self, position_secs: f64) -> Result<TransportProgress, TakeServiceError> {
        Ok(self.state.lock().await.transport.seek(position_secs)?)
    }

    pub async fn progress(&self) -> TransportProgress {
        self.state.lock().await.transport.poll()
    }

    pub async fn output_name(&self) -> &'static str {
        self.state.lock().await.transport.output_name()
    }

    /// Encode the current take as a downloadable WAV file
    pub async fn export_wav(&self) -> Result<WavExport, TakeServiceError> {
        let buffer = {
            let state = self.state.lock().await;
            state
                .current
                .as_ref()
                .map(|take| take.buffer.clone())
                .ok_or(TakeServiceError::NoTake)?
        };

        let bytes = encode_wav(&buffer)?;
        let file_name = format!("pr_voice_{}.wav", Utc::now().timestamp_millis());

        tracing::info!(
            file_name = %file_name,
            size_bytes = bytes.len(),
            "WAV export created"
        );

        Ok(WavExport { file_name, bytes })
    }

    /// Release the audio output on teardown
    pub async fn shutdown(&self) {
        let mut state = self.state.lock().await;
        state.transport.shutdown();
        state.current = None;
        tracing::info!("Take service shut down");
    }

    async fn synthesize(
        &self,
        thai_text: &str,
        english_text: &str,
        profile: &VoiceProfile,
    ) -> Result<DecodedAudioBuffer, TakeServiceError> {
        let bytes = self
            .speech_service
            .request_speech(thai_text, english_text, profile)
            .await?;
        Ok(decode_pcm16(&bytes, self.sample_rate, self.channel_count)?)
    }
}
