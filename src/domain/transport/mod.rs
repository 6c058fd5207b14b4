pub mod error;
pub mod service;

pub use error::PlaybackError;
pub use service::PlaybackTransport;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportState {
    Idle,
    Playing,
    /// Not sounding, keeps the resume offset
    Stopped,
    Completed,
}

/// Snapshot reported to the interface on every poll
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransportProgress {
    pub state: TransportState,
    pub position_secs: f64,
    pub duration_secs: f64,
}
