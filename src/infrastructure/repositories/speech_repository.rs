use crate::domain::voice::VoiceType;
use async_trait::async_trait;

/// Repository for generative speech synthesis.
/// Abstracts the underlying provider (Gemini today).
///
/// Implementations are responsible for:
/// - Building the provider-specific request for a prebuilt voice
/// - Locating the audio payload in the provider response
#[async_trait]
pub trait SpeechRepository: Send + Sync {
    /// Synthesize the given instruction prompt with a prebuilt voice
    ///
    /// Returns the base64-encoded raw PCM payload, or `None` when the
    /// provider answered without an audio candidate.
    ///
    /// # Errors
    /// Returns error if the call fails (network, authentication, quota)
    async fn synthesize(&self, prompt: &str, voice: VoiceType) -> Result<Option<String>, String>;
}
