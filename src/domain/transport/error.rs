#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PlaybackError {
    #[error("no audio loaded")]
    NoAudio,
    #[error("audio output unavailable: {0}")]
    OutputUnavailable(String),
}
