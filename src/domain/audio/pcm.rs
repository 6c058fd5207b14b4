use super::{AudioError, DecodedAudioBuffer};

const BYTES_PER_SAMPLE: usize = 2;

/// Signed 16-bit magnitude ceiling used for normalization
const I16_SCALE: f32 = 32768.0;

/// Decode interleaved 16-bit little-endian PCM into a normalized buffer.
///
/// A trailing partial frame (byte length not a multiple of
/// `2 * channel_count`) is dropped rather than rejected, because generative
/// audio payloads can arrive trimmed.
pub fn decode_pcm16(
    bytes: &[u8],
    sample_rate: u32,
    channel_count: usize,
) -> Result<DecodedAudioBuffer, AudioError> {
    if channel_count == 0 {
        return Err(AudioError::Decode(
            "channel count must be at least 1".to_string(),
        ));
    }
    if sample_rate == 0 {
        return Err(AudioError::Decode(
            "sample rate must be positive".to_string(),
        ));
    }

    let frame_size = BYTES_PER_SAMPLE * channel_count;
    let frames = bytes.len() / frame_size;
    let dropped = bytes.len() % frame_size;

    if dropped > 0 {
        tracing::warn!(
            byte_length = bytes.len(),
            dropped_bytes = dropped,
            channel_count = channel_count,
            "PCM payload ends with a partial frame, truncating"
        );
    }

    let mut channels: Vec<Vec<f32>> = (0..channel_count)
        .map(|_| Vec::with_capacity(frames))
        .collect();

    for frame in bytes.chunks_exact(frame_size) {
        for (channel, sample) in channels
            .iter_mut()
            .zip(frame.chunks_exact(BYTES_PER_SAMPLE))
        {
            let value = i16::from_le_bytes([sample[0], sample[1]]);
            channel.push(value as f32 / I16_SCALE);
        }
    }

    tracing::debug!(
        frames = frames,
        channel_count = channel_count,
        sample_rate = sample_rate,
        "PCM payload decoded"
    );

    Ok(DecodedAudioBuffer::new(sample_rate, channels))
}
