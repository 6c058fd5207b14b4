use super::{AudioError, DecodedAudioBuffer};

/// Size of the canonical RIFF + fmt + data headers
pub const WAV_HEADER_LEN: usize = 44;

const BITS_PER_SAMPLE: u16 = 16;
const PCM_FORMAT: u16 = 1;

/// Serialize a buffer as a 16-bit PCM RIFF/WAVE file with only `fmt ` and `data` chunks
pub fn encode_wav(buffer: &DecodedAudioBuffer) -> Result<Vec<u8>, AudioError> {
    let sample_rate = buffer.sample_rate();
    let channel_count = buffer.channel_count();

    if sample_rate == 0 {
        return Err(AudioError::Encode("sample rate must be positive".to_string()));
    }
    if channel_count == 0 {
        return Err(AudioError::Encode("buffer has no channels".to_string()));
    }
    let frames = buffer.sample_count();
    if buffer.channels().iter().any(|c| c.len() != frames) {
        return Err(AudioError::Encode(
            "channels have different lengths".to_string(),
        ));
    }

    let channels = u16::try_from(channel_count)
        .map_err(|_| AudioError::Encode(format!("too many channels: {}", channel_count)))?;
    let block_align = channels * (BITS_PER_SAMPLE / 8);
    let byte_rate = sample_rate
        .checked_mul(block_align as u32)
        .ok_or_else(|| AudioError::Encode("byte rate overflows 32 bits".to_string()))?;
    let data_len = frames
        .checked_mul(block_align as usize)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| n.checked_add(36).is_some())
        .ok_or_else(|| AudioError::Encode("audio too long for a WAV file".to_string()))?;

    let mut out = Vec::with_capacity(WAV_HEADER_LEN + data_len as usize);

    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&PCM_FORMAT.to_le_bytes());
    out.extend_from_slice(&channels.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for frame in 0..frames {
        for channel in buffer.channels() {
            out.extend_from_slice(&quantize(channel[frame]).to_le_bytes());
        }
    }

    Ok(out)
}

/// Clamp first so out-of-range input saturates instead of wrapping
fn quantize(sample: f32) -> i16 {
    let s = if sample.is_nan() { 0.0 } else { sample.clamp(-1.0, 1.0) };
    if s < 0.0 {
        (s * 32768.0) as i16
    } else {
        (s * 32767.0) as i16
    }
}
