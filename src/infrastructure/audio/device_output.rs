//! Sound-card output through cpal.
//! Resamples from the buffer rate to the device rate and expands mono to the
//! device channel count. The cpal stream lives on its own thread because it is
//! not `Send` on every platform.

use super::{AudioOutput, EndNotifier, PlaybackHandle};
use crate::domain::audio::DecodedAudioBuffer;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, FromSample, SampleFormat, SizedSample, Stream, StreamConfig};
use rubato::{FftFixedIn, Resampler};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

const RESAMPLE_CHUNK: usize = 1024;

pub struct DeviceAudioOutput {
    origin: Instant,
    device_name: String,
}

impl DeviceAudioOutput {
    /// Probe the default output device once at start-up
    pub fn new() -> Result<Self, String> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| "no output device available".to_string())?;
        device
            .default_output_config()
            .map_err(|e| format!("failed to get default output config: {}", e))?;
        let device_name = device.name().unwrap_or_else(|_| "unknown".to_string());

        tracing::info!(device = %device_name, "Audio output device ready");

        Ok(Self {
            origin: Instant::now(),
            device_name,
        })
    }
}

/// Playback handle - dropping stops playback (RAII)
struct DevicePlayback {
    stop_tx: Option<mpsc::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl PlaybackHandle for DevicePlayback {
    fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(thread) = self.thread.take() {
            join_playback_thread(thread);
        }
    }
}

/// Wait for the stream thread to close the device.
///
/// On a multi-threaded runtime the wait moves off the async worker so other
/// tasks keep running while the stream shuts down.
fn join_playback_thread(thread: JoinHandle<()>) {
    let on_multi_thread_runtime = tokio::runtime::Handle::try_current()
        .map(|h| h.runtime_flavor() == tokio::runtime::RuntimeFlavor::MultiThread)
        .unwrap_or(false);

    let result = if on_multi_thread_runtime {
        tokio::task::block_in_place(|| thread.join())
    } else {
        thread.join()
    };

    if result.is_err() {
        tracing::error!("Playback thread panicked");
    }
}

impl Drop for DevicePlayback {
    fn drop(&mut self) {
        self.stop();
    }
}

impl AudioOutput for DeviceAudioOutput {
    fn name(&self) -> &'static str {
        "device"
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
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<(), String>>();

        tracing::debug!(
            device = %self.device_name,
            session = on_end.session(),
            offset_secs = offset_secs,
            "Starting device playback"
        );

        let thread = std::thread::Builder::new()
            .name("pr-voice-playback".to_string())
            .spawn(move || {
                let finished = Arc::new(AtomicBool::new(false));
                let stream = match open_stream(&buffer, offset_secs, finished.clone()) {
                    Ok(stream) => stream,
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };
                let _ = ready_tx.send(Ok(()));

                loop {
                    match stop_rx.recv_timeout(Duration::from_millis(20)) {
                        Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
                        Err(mpsc::RecvTimeoutError::Timeout) => {
                            if finished.load(Ordering::SeqCst) {
                                on_end.notify();
                                break;
                            }
                        }
                    }
                }
                drop(stream);
            })
            .map_err(|e| format!("failed to spawn playback thread: {}", e))?;

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(Box::new(DevicePlayback {
                stop_tx: Some(stop_tx),
                thread: Some(thread),
            })),
            Ok(Err(e)) => {
                let _ = thread.join();
                Err(e)
            }
            Err(_) => {
                let _ = thread.join();
                Err("playback thread exited before opening the device".to_string())
            }
        }
    }
}

fn open_stream(
    buffer: &DecodedAudioBuffer,
    offset_secs: f64,
    finished: Arc<AtomicBool>,
) -> Result<Stream, String> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| "no output device available".to_string())?;
    let supported_config = device
        .default_output_config()
        .map_err(|e| format!("failed to get default output config: {}", e))?;

    let native_rate = supported_config.sample_rate().0;
    let native_channels = supported_config.channels() as usize;
    let sample_format = supported_config.sample_format();
    let config: StreamConfig = supported_config.into();

    let samples = device_samples(buffer, offset_secs, native_rate, native_channels)?;
    let samples = Arc::new(samples);
    let position = Arc::new(AtomicUsize::new(0));

    let stream = match sample_format {
        SampleFormat::F32 => build_stream::<f32>(&device, &config, samples, position, finished)?,
        SampleFormat::I16 => build_stream::<i16>(&device, &config, samples, position, finished)?,
        format => return Err(format!("unsupported sample format: {:?}", format)),
    };

    stream
        .play()
        .map_err(|e| format!("failed to start playback stream: {}", e))?;
    Ok(stream)
}

/// Interleaved samples at the device rate and channel layout
fn device_samples(
    buffer: &DecodedAudioBuffer,
    offset_secs: f64,
    native_rate: u32,
    native_channels: usize,
) -> Result<Vec<f32>, String> {
    let start = ((offset_secs.max(0.0) * buffer.sample_rate() as f64) as usize)
        .min(buffer.sample_count());

    let mut resampled: Vec<Vec<f32>> = Vec::with_capacity(buffer.channel_count());
    for channel in buffer.channels() {
        let tail = &channel[start..];
        if buffer.sample_rate() == native_rate {
            resampled.push(tail.to_vec());
        } else {
            resampled.push(resample(tail, buffer.sample_rate(), native_rate)?);
        }
    }

    let frames = resampled.first().map(Vec::len).unwrap_or(0);
    let source_channels = resampled.len().max(1);
    let mut out = Vec::with_capacity(frames * native_channels);
    for frame in 0..frames {
        for ch in 0..native_channels {
            let source = if source_channels == 1 { 0 } else { ch % source_channels };
            out.push(resampled.get(source).map(|c| c[frame]).unwrap_or(0.0));
        }
    }
    Ok(out)
}

fn build_stream<T>(
    device: &Device,
    config: &StreamConfig,
    samples: Arc<Vec<f32>>,
    position: Arc<AtomicUsize>,
    finished: Arc<AtomicBool>,
) -> Result<Stream, String>
where
    T: SizedSample + FromSample<f32> + Default + Send + 'static,
{
    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                let pos = position.load(Ordering::SeqCst);
                let remaining = samples.len().saturating_sub(pos);

                if remaining == 0 {
                    data.fill(T::default());
                    finished.store(true, Ordering::SeqCst);
                    return;
                }

                let to_copy = remaining.min(data.len());
                for (i, &sample) in samples[pos..pos + to_copy].iter().enumerate() {
                    data[i] = T::from_sample(sample);
                }

                if to_copy < data.len() {
                    data[to_copy..].fill(T::default());
                }

                position.store(pos + to_copy, Ordering::SeqCst);
            },
            move |err| {
                tracing::error!(error = ?err, "playback stream error");
            },
            None,
        )
        .map_err(|e| format!("failed to build output stream: {}", e))
}

fn resample(samples: &[f32], source_rate: u32, target_rate: u32) -> Result<Vec<f32>, String> {
    let mut resampler = FftFixedIn::<f32>::new(
        source_rate as usize,
        target_rate as usize,
        RESAMPLE_CHUNK,
        2,
        1,
    )
    .map_err(|e| format!("failed to create resampler: {}", e))?;

    let mut output = Vec::new();
    let mut pos = 0;

    while pos < samples.len() {
        let frames_needed = resampler.input_frames_next();
        let end = (pos + frames_needed).min(samples.len());

        let mut input_chunk = samples[pos..end].to_vec();
        if input_chunk.len() < frames_needed {
            input_chunk.resize(frames_needed, 0.0);
        }

        let resampled = resampler
            .process(&[input_chunk], None)
            .map_err(|e| format!("resampling failed: {:?}", e))?;
        if let Some(chunk) = resampled.into_iter().next() {
            output.extend(chunk);
        }

        pos = end;
    }

    Ok(output)
}
