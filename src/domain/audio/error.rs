#[derive(Debug, thiserror::Error, PartialEq)]
pub enum AudioError {
    #[error("decode error: {0}")]
    Decode(String),
    #[error("encode error: {0}")]
    Encode(String),
}
