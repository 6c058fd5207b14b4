use super::error::PlaybackError;
use super::{TransportProgress, TransportState};
use crate::domain::audio::DecodedAudioBuffer;
use crate::infrastructure::audio::{AudioOutput, EndNotifier, PlaybackHandle, SessionId};
use std::sync::Arc;
use tokio::sync::mpsc;

struct PlaybackSession {
    id: SessionId,
    handle: Box<dyn PlaybackHandle>,
    /// Output clock value that corresponds to position 0 of the buffer
    clock_reference: f64,
}

/// Play / stop / seek state machine over the single current buffer.
///
/// At most one hardware handle exists at a time; every transition that leaves
/// `Playing` stops it before anything else is acquired. Natural completion is
/// taken from the output's end notification, never from the clock.
pub struct PlaybackTransport {
    output: Arc<dyn AudioOutput>,
    buffer: Option<Arc<DecodedAudioBuffer>>,
    session: Option<PlaybackSession>,
    state: TransportState,
    offset_secs: f64,
    next_session_id: SessionId,
    ended_tx: mpsc::UnboundedSender<SessionId>,
    ended_rx: mpsc::UnboundedReceiver<SessionId>,
}

impl PlaybackTransport {
    pub fn new(output: Arc<dyn AudioOutput>) -> Self {
        let (ended_tx, ended_rx) = mpsc::unbounded_channel();
        Self {
            output,
            buffer: None,
            session: None,
            state: TransportState::Idle,
            offset_secs: 0.0,
            next_session_id: 1,
            ended_tx,
            ended_rx,
        }
    }

    pub fn output_name(&self) -> &'static str {
        self.output.name()
    }

    pub fn state(&mut self) -> TransportState {
        self.sync_end_notifications();
        self.state
    }

    /// Replace the buffer, releasing any session on the previous one
    pub fn load(&mut self, buffer: Arc<DecodedAudioBuffer>) {
        self.release_session();
        self.drain_end_notifications();
        self.buffer = Some(buffer);
        self.offset_secs = 0.0;
        self.state = TransportState::Idle;
    }

    /// Drop the buffer for a new generation
    pub fn unload(&mut self) {
        if self.release_session().is_some() {
            tracing::info!("Playback interrupted by new generation");
        }
        self.drain_end_notifications();
        self.buffer = None;
        self.offset_secs = 0.0;
        self.state = TransportState::Idle;
    }

    /// Start playing from `offset_secs`, or resume from the retained offset.
    ///
    /// Resuming at or past the end restarts from the beginning.
    pub fn play(&mut self, offset_secs: Option<f64>) -> Result<TransportProgress, PlaybackError> {
        self.sync_end_notifications();

        let buffer = self.buffer.clone().ok_or(PlaybackError::NoAudio)?;
        let duration = buffer.duration_secs();

        if let Some(reached) = self.release_session() {
            self.offset_secs = reached;
        }

        let start = match offset_secs {
            Some(offset) => clamp_offset(offset, duration),
            None if self.offset_secs >= duration => 0.0,
            None => self.offset_secs,
        };

        let id = self.next_session_id;
        self.next_session_id += 1;

        let clock_reference = self.output.current_time() - start;
        let handle = match self.output.start(
            buffer,
            start,
            EndNotifier::new(id, self.ended_tx.clone()),
        ) {
            Ok(handle) => handle,
            Err(e) => {
                tracing::error!(error = %e, offset_secs = start, "Failed to acquire audio output");
                self.offset_secs = start;
                self.state = TransportState::Stopped;
                return Err(PlaybackError::OutputUnavailable(e));
            }
        };

        tracing::info!(
            session = id,
            offset_secs = start,
            duration_secs = duration,
            "Playback started"
        );

        self.session = Some(PlaybackSession {
            id,
            handle,
            clock_reference,
        });
        self.offset_secs = start;
        self.state = TransportState::Playing;

        Ok(self.progress())
    }

    /// Stop output and keep the reached position as the resume point
    pub fn stop(&mut self) -> TransportProgress {
        self.sync_end_notifications();

        if let Some(position) = self.release_session() {
            tracing::info!(position_secs = position, "Playback stopped");
            self.offset_secs = position;
            self.state = TransportState::Stopped;
        }

        self.progress()
    }

    /// Reposition. While playing this restarts output at the new offset.
    pub fn seek(&mut self, position_secs: f64) -> Result<TransportProgress, PlaybackError> {
        self.sync_end_notifications();

        let duration = self
            .buffer
            .as_ref()
            .ok_or(PlaybackError::NoAudio)?
            .duration_secs();
        let target = clamp_offset(position_secs, duration);

        if self.state == TransportState::Playing {
            self.stop();
            return self.play(Some(target));
        }

        self.offset_secs = target;
        self.state = TransportState::Stopped;
        Ok(self.progress())
    }

    /// Sample elapsed time. Only reports; completion comes from the output.
    pub fn poll(&mut self) -> TransportProgress {
        self.sync_end_notifications();
        self.progress()
    }

    /// Release hardware on teardown
    pub fn shutdown(&mut self) {
        self.unload();
    }

    fn duration_secs(&self) -> f64 {
        self.buffer
            .as_ref()
            .map(|b| b.duration_secs())
            .unwrap_or(0.0)
    }

    fn position_secs(&self) -> f64 {
        match &self.session {
            Some(session) if self.state == TransportState::Playing => clamp_offset(
                self.output.current_time() - session.clock_reference,
                self.duration_secs(),
            ),
            _ => self.offset_secs,
        }
    }

    fn progress(&self) -> TransportProgress {
        TransportProgress {
            state: self.state,
            position_secs: self.position_secs(),
            duration_secs: self.duration_secs(),
        }
    }

    /// Stop and drop the current session, returning the position it reached
    fn release_session(&mut self) -> Option<f64> {
        let position = self.position_secs();
        let mut session = self.session.take()?;
        session.handle.stop();
        tracing::debug!(session = session.id, "Playback session released");
        Some(position)
    }

    fn sync_end_notifications(&mut self) {
        while let Ok(ended) = self.ended_rx.try_recv() {
            let current = self.session.as_ref().map(|s| s.id);
            if current == Some(ended) {
                self.release_session();
                self.offset_secs = self.duration_secs();
                self.state = TransportState::Completed;
                tracing::info!(session = ended, "Playback completed");
            } else {
                tracing::debug!(session = ended, "Ignoring end of superseded session");
            }
        }
    }

    fn drain_end_notifications(&mut self) {
        while self.ended_rx.try_recv().is_ok() {}
    }
}

impl Drop for PlaybackTransport {
    fn drop(&mut self) {
        self.release_session();
    }
}

fn clamp_offset(offset: f64, duration: f64) -> f64 {
    if !offset.is_finite() {
        return 0.0;
    }
    offset.clamp(0.0, duration.max(0.0))
}
