use super::{AudioOutput, EndNotifier, PlaybackHandle};
use crate::domain::audio::DecodedAudioBuffer;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Headless output driven by the tokio clock.
///
/// Produces no sound; the end notification fires once the remaining
/// duration has elapsed, the same way a sound card would report it.
pub struct SimulatedAudioOutput {
    origin: Instant,
}

impl SimulatedAudioOutput {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SimulatedAudioOutput {
    fn default() -> Self {
        Self::new()
    }
}

/// Playback "resource": the pending end timer
struct SimulatedPlayback {
    timer: JoinHandle<()>,
}

impl PlaybackHandle for SimulatedPlayback {
    fn stop(&mut self) {
        self.timer.abort();
    }
}

impl Drop for SimulatedPlayback {
    fn drop(&mut self) {
        self.timer.abort();
    }
}

impl AudioOutput for SimulatedAudioOutput {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn current_time(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    fn start(
        &self,
        buffer: Arc<DecodedAudioBuffer>,
        offset_secs: f64,
        on_end: EndNotifier,
    ) -> Result<Box<dyn PlaybackHandle>, String> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| format!("simulated output needs a tokio runtime: {}", e))?;

        let remaining = (buffer.duration_secs() - offset_secs).max(0.0);
        tracing::debug!(
            session = on_end.session(),
            offset_secs = offset_secs,
            remaining_secs = remaining,
            "Simulated playback started"
        );

        let timer = runtime.spawn(async move {
            tokio::time::sleep(Duration::from_secs_f64(remaining)).await;
            on_end.notify();
        });

        Ok(Box::new(SimulatedPlayback { timer }))
    }
}
