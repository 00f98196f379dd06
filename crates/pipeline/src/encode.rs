//! PCM quantization and WAV container encoding
//!
//! Two encoder implementations sit behind the [`AudioEncoder`] seam:
//!
//! - [`WavEncoder`] writes the container into an in-memory buffer and is
//!   the primary path (no filesystem access).
//! - [`TempFileEncoder`] writes through a uniquely named temporary file
//!   and reads the bytes back; the fallback path uses it when in-memory
//!   encoding fails. The temp file is removed on every exit path.
//!
//! Both share [`quantize`], so primary and fallback audio use identical
//! float-to-i16 scaling (round-to-nearest; exact byte parity with
//! truncating encoders is not a goal).

use std::io::Cursor;
use std::sync::Arc;

use business_voice_core::constants::audio;
use business_voice_core::{AudioClip, EncodedAudio};

use crate::PipelineError;

/// Scale clipped float samples (`[-1.0, 1.0]`) to signed 16-bit PCM.
pub fn quantize(samples: &[f64]) -> AudioClip {
    let pcm: Vec<i16> = samples
        .iter()
        .map(|&s| (s.clamp(-1.0, 1.0) * f64::from(i16::MAX)).round() as i16)
        .collect();
    AudioClip::new(pcm, audio::SAMPLE_RATE, audio::CHANNELS)
}

fn wav_spec(clip: &AudioClip) -> hound::WavSpec {
    hound::WavSpec {
        channels: clip.channels(),
        sample_rate: clip.sample_rate(),
        bits_per_sample: audio::BITS_PER_SAMPLE,
        sample_format: hound::SampleFormat::Int,
    }
}

/// Serializer from PCM frames to container bytes
pub trait AudioEncoder: Send + Sync {
    fn encode(&self, clip: &AudioClip) -> Result<EncodedAudio, PipelineError>;
}

/// Primary encoder: WAV container written into an in-memory buffer
#[derive(Debug, Default)]
pub struct WavEncoder;

impl WavEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl AudioEncoder for WavEncoder {
    fn encode(&self, clip: &AudioClip) -> Result<EncodedAudio, PipelineError> {
        if clip.is_empty() {
            return Err(PipelineError::EncodingFailed(
                "no samples to encode".to_string(),
            ));
        }

        let mut buffer = Vec::new();
        {
            let cursor = Cursor::new(&mut buffer);
            let mut writer = hound::WavWriter::new(cursor, wav_spec(clip))
                .map_err(|e| PipelineError::EncodingFailed(format!("WAV header: {}", e)))?;
            for &sample in clip.samples() {
                writer
                    .write_sample(sample)
                    .map_err(|e| PipelineError::EncodingFailed(format!("WAV frame: {}", e)))?;
            }
            writer
                .finalize()
                .map_err(|e| PipelineError::EncodingFailed(format!("WAV finalize: {}", e)))?;
        }

        Ok(EncodedAudio::new(buffer))
    }
}

/// Fallback encoder: WAV container written via a transient on-disk file
///
/// Each call creates its own uniquely named temp file, so concurrent
/// requests never share a handle. The file guard deletes it when this
/// function returns, whether encoding succeeded or failed.
#[derive(Debug, Default)]
pub struct TempFileEncoder;

impl TempFileEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl AudioEncoder for TempFileEncoder {
    fn encode(&self, clip: &AudioClip) -> Result<EncodedAudio, PipelineError> {
        if clip.is_empty() {
            return Err(PipelineError::EncodingFailed(
                "no samples to encode".to_string(),
            ));
        }

        let file = tempfile::Builder::new()
            .suffix(".wav")
            .tempfile()
            .map_err(|e| PipelineError::EncodingFailed(format!("temp file: {}", e)))?;

        let mut writer = hound::WavWriter::create(file.path(), wav_spec(clip))
            .map_err(|e| PipelineError::EncodingFailed(format!("WAV create: {}", e)))?;
        for &sample in clip.samples() {
            writer
                .write_sample(sample)
                .map_err(|e| PipelineError::EncodingFailed(format!("WAV frame: {}", e)))?;
        }
        writer
            .finalize()
            .map_err(|e| PipelineError::EncodingFailed(format!("WAV finalize: {}", e)))?;

        let bytes = std::fs::read(file.path())
            .map_err(|e| PipelineError::EncodingFailed(format!("temp file read: {}", e)))?;

        Ok(EncodedAudio::new(bytes))
    }
}

/// Default primary/fallback encoder pair
pub fn default_encoders() -> (Arc<dyn AudioEncoder>, Arc<dyn AudioEncoder>) {
    (Arc::new(WavEncoder::new()), Arc::new(TempFileEncoder::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(audio: &EncodedAudio) -> (hound::WavSpec, Vec<i16>) {
        let reader = hound::WavReader::new(Cursor::new(audio.as_bytes())).unwrap();
        let spec = reader.spec();
        let samples: Vec<i16> = reader.into_samples().map(|s| s.unwrap()).collect();
        (spec, samples)
    }

    #[test]
    fn test_quantize_rounds_to_nearest() {
        let clip = quantize(&[0.0, 1.0, -1.0, 0.5]);
        assert_eq!(clip.samples()[0], 0);
        assert_eq!(clip.samples()[1], 32767);
        assert_eq!(clip.samples()[2], -32767);
        assert_eq!(clip.samples()[3], 16384); // 16383.5 rounds away from zero
    }

    #[test]
    fn test_quantize_clamps_out_of_range() {
        let clip = quantize(&[1.5, -2.0]);
        assert_eq!(clip.samples(), &[32767, -32767]);
    }

    #[test]
    fn test_wav_round_trip() {
        let samples = [0.0, 0.25, -0.25, 0.99, -0.99];
        let clip = quantize(&samples);
        let audio = WavEncoder::new().encode(&clip).unwrap();

        let (spec, decoded) = decode(&audio);
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 22050);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(decoded.len(), samples.len());
        for (decoded, original) in decoded.iter().zip(&samples) {
            let expected = (original * 32767.0).round() as i16;
            assert!((decoded - expected).abs() <= 1);
        }
    }

    #[test]
    fn test_wav_header_layout() {
        let clip = quantize(&[0.1; 100]);
        let audio = WavEncoder::new().encode(&clip).unwrap();
        let bytes = audio.as_bytes();

        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        // data chunk length = 2 bytes per frame
        let (_, decoded) = decode(&audio);
        assert_eq!(decoded.len(), 100);
    }

    #[test]
    fn test_empty_samples_rejected() {
        let clip = quantize(&[]);
        let err = WavEncoder::new().encode(&clip).unwrap_err();
        assert!(matches!(err, PipelineError::EncodingFailed(_)));

        let err = TempFileEncoder::new().encode(&clip).unwrap_err();
        assert!(matches!(err, PipelineError::EncodingFailed(_)));
    }

    #[test]
    fn test_temp_file_encoder_matches_primary() {
        let samples: Vec<f64> = (0..500).map(|i| ((i as f64) * 0.01).sin() * 0.8).collect();
        let clip = quantize(&samples);

        let primary = WavEncoder::new().encode(&clip).unwrap();
        let fallback = TempFileEncoder::new().encode(&clip).unwrap();
        assert_eq!(primary, fallback);
    }
}
