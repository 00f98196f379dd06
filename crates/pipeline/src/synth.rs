//! Procedural speech-like waveform simulation
//!
//! Fabricates a voice-shaped signal from timing derived from text length:
//! three decaying sine harmonics on a 150 Hz fundamental, per-sample
//! Gaussian noise, and a centered Gaussian envelope. The result sounds
//! voice-ish rather than intelligible, which is all the downstream quality
//! gate needs.
//!
//! The `language` of a request does not affect the waveform; only the
//! quality estimator uses it. That asymmetry is intentional and tracked
//! as an open product question (should language affect timbre?).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use business_voice_core::constants::audio;

/// Base voice frequency (Hz)
const FUNDAMENTAL_HZ: f64 = 150.0;

/// Harmonic layers: (multiple of the fundamental, weight, decay time constant)
const HARMONICS: [(f64, f64, f64); 3] = [(1.0, 0.4, 4.0), (2.0, 0.2, 5.0), (3.0, 0.1, 6.0)];

/// Standard deviation of the per-sample Gaussian noise
const NOISE_STD: f64 = 0.02;

/// Fallback single-tone frequency (Hz)
const FALLBACK_HZ: f64 = 200.0;
const FALLBACK_WEIGHT: f64 = 0.3;
const FALLBACK_DECAY: f64 = 3.0;

/// Clip duration in seconds for the given text
pub fn duration_secs(text: &str) -> f64 {
    (text.chars().count() as f64 * audio::SECONDS_PER_CHAR).max(audio::MIN_DURATION_SECS)
}

/// Number of samples a clip for `text` will contain
pub fn sample_count(text: &str) -> usize {
    (audio::SAMPLE_RATE as f64 * duration_secs(text)).round() as usize
}

/// Evenly spaced time points over `[0, duration]`, endpoint inclusive
fn time_axis(duration: f64) -> Vec<f64> {
    let n = (audio::SAMPLE_RATE as f64 * duration).round() as usize;
    // Minimum duration of 1.5s guarantees n >= 2
    let step = duration / (n - 1) as f64;
    (0..n).map(|i| i as f64 * step).collect()
}

/// Synthesize the simulated voice waveform for `text`.
///
/// Deterministic for a fixed `seed`; the output length depends only on
/// the text length. All samples lie in `[-1.0, 1.0]`.
pub fn synthesize(text: &str, seed: u64) -> Vec<f64> {
    let duration = duration_secs(text);
    let mut rng = StdRng::seed_from_u64(seed);

    time_axis(duration)
        .into_iter()
        .map(|t| {
            let mut sample: f64 = HARMONICS
                .iter()
                .map(|&(mult, weight, decay)| {
                    (std::f64::consts::TAU * FUNDAMENTAL_HZ * mult * t).sin()
                        * weight
                        * (-t / decay).exp()
                })
                .sum();

            // Slight natural noise
            let noise: f64 = rng.sample(StandardNormal);
            sample += noise * NOISE_STD;

            // Centered Gaussian envelope for a natural speech contour
            let envelope = (-((t - duration / 2.0).powi(2)) / (duration / 3.0)).exp();
            (sample * envelope).clamp(-1.0, 1.0)
        })
        .collect()
}

/// Simpler single-tone waveform for the fallback generation path.
///
/// One decaying 200 Hz sine, no harmonics, no noise, no envelope. Same
/// duration and time-axis rules as [`synthesize`].
pub fn synthesize_fallback(text: &str) -> Vec<f64> {
    let duration = duration_secs(text);

    time_axis(duration)
        .into_iter()
        .map(|t| {
            (std::f64::consts::TAU * FALLBACK_HZ * t).sin()
                * FALLBACK_WEIGHT
                * (-t / FALLBACK_DECAY).exp()
        })
        .collect()
}
