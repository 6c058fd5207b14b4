#[derive(Debug, thiserror::Error)]
pub enum SpeechServiceError {
    #[error("no audio data received from the speech API")]
    EmptyResponse,
    #[error("upstream error: {0}")]
    Upstream(String),
    #[error("invalid audio payload: {0}")]
    InvalidPayload(String),
}
