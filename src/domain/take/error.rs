use crate::domain::audio::AudioError;
use crate::domain::speech::SpeechServiceError;
use crate::domain::transport::PlaybackError;
use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum TakeServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("speech generation failed: {0}")]
    Generation(#[from] SpeechServiceError),
    #[error(transparent)]
    Audio(#[from] AudioError),
    #[error("playback error: {0}")]
    Playback(#[from] PlaybackError),
    #[error("superseded by a newer generation request")]
    Superseded,
    #[error("no generated audio available")]
    NoTake,
}

impl From<TakeServiceError> for AppError {
    fn from(err: TakeServiceError) -> Self {
        match err {
            TakeServiceError::Invalid(msg) => AppError::BadRequest(msg),
            TakeServiceError::Generation(e) => AppError::GenerationFailed(e.to_string()),
            TakeServiceError::Audio(AudioError::Decode(msg)) => AppError::GenerationFailed(msg),
            TakeServiceError::Audio(AudioError::Encode(msg)) => AppError::Internal(msg),
            TakeServiceError::Playback(PlaybackError::NoAudio) | TakeServiceError::NoTake => {
                AppError::NotFound("No generated audio available".to_string())
            }
            TakeServiceError::Playback(PlaybackError::OutputUnavailable(msg)) => {
                AppError::PlaybackUnavailable(msg)
            }
            TakeServiceError::Superseded => {
                AppError::Conflict("Superseded by a newer generation request".to_string())
            }
        }
    }
}
