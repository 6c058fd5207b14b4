//! Hardware audio output seam used by the playback transport.
//!
//! An output renders a decoded buffer from an offset, exposes a running clock
//! for elapsed-time polling, and reports natural end of playback through an
//! [`EndNotifier`] tagged with the session that produced it.

#[cfg(feature = "device-output")]
pub mod device_output;
pub mod simulated_output;

#[cfg(feature = "device-output")]
pub use device_output::DeviceAudioOutput;
pub use simulated_output::SimulatedAudioOutput;

use crate::domain::audio::DecodedAudioBuffer;
use crate::infrastructure::config::AudioOutputKind;
use std::sync::Arc;
use tokio::sync::mpsc;

pub type SessionId = u64;

/// Delivers the end-of-playback notification for one session
#[derive(Debug, Clone)]
pub struct EndNotifier {
    session: SessionId,
    tx: mpsc::UnboundedSender<SessionId>,
}

impl EndNotifier {
    pub fn new(session: SessionId, tx: mpsc::UnboundedSender<SessionId>) -> Self {
        Self { session, tx }
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Safe to call from any thread, including audio callbacks
    pub fn notify(&self) {
        // Receiver gone means the transport was torn down
        let _ = self.tx.send(self.session);
    }
}

/// A live hardware playback resource. Dropping it must also stop output.
pub trait PlaybackHandle: Send {
    /// Stop output immediately
    fn stop(&mut self);
}

pub trait AudioOutput: Send + Sync {
    /// Short backend name for logs and readiness checks
    fn name(&self) -> &'static str;

    /// Monotonic clock in seconds
    fn current_time(&self) -> f64;

    /// Begin rendering `buffer` from `offset_secs`
    ///
    /// # Errors
    /// Returns error if the output device cannot be acquired
    fn start(
        &self,
        buffer: Arc<DecodedAudioBuffer>,
        offset_secs: f64,
        on_end: EndNotifier,
    ) -> Result<Box<dyn PlaybackHandle>, String>;
}

/// Build the configured output backend
pub fn create_output(kind: &AudioOutputKind) -> Result<Arc<dyn AudioOutput>, String> {
    match kind {
        AudioOutputKind::Simulated => Ok(Arc::new(SimulatedAudioOutput::new())),
        #[cfg(feature = "device-output")]
        AudioOutputKind::Device => Ok(Arc::new(DeviceAudioOutput::new()?)),
        #[cfg(not(feature = "device-output"))]
        AudioOutputKind::Device => Err(
            "AUDIO_OUTPUT=device requires building with the `device-output` feature".to_string(),
        ),
    }
}
