//! Voice generation orchestration
//!
//! Drives one request through estimate -> synthesize -> encode, with a
//! single fallback attempt when in-memory encoding fails: re-synthesize
//! the simpler single-tone waveform and encode through the temp-file
//! path. The policy is expressed as a tagged state machine so the
//! "try primary, else try fallback, else fail" flow is testable on its
//! own, independent of any particular error value.
//!
//! ```text
//! Idle -> Estimating -> Synthesizing -> EncodingPrimary
//!     EncodingPrimary -> Success
//!     EncodingPrimary -> EncodingFallback -> Success | Failed
//! ```
//!
//! Each `generate` call walks a fresh machine; no request observes
//! another's intermediate state.

use std::sync::Arc;

use serde::Serialize;

use business_voice_core::constants::{limits, quality as quality_consts};
use business_voice_core::{snippet, EncodedAudio, GenerationRequest, Language};
use business_voice_monitoring::CallStats;

use crate::encode::{self, AudioEncoder};
use crate::{quality, synth, PipelineError};

/// Orchestrator configuration
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Fixed noise seed; when `None` the seed is derived from the request
    /// text so identical requests produce byte-identical audio
    pub noise_seed: Option<u64>,
    /// Quality threshold for `meets_target` checks
    pub quality_target: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            noise_seed: None,
            quality_target: quality_consts::TARGET,
        }
    }
}

/// Successful generation output, owned by the caller
#[derive(Debug, Clone)]
pub struct GeneratedVoice {
    pub audio: EncodedAudio,
    pub quality: f64,
}

impl GeneratedVoice {
    pub fn meets_target(&self, target: f64) -> bool {
        self.quality >= target
    }
}

/// Tagged states of one generation run
pub enum GenerationState {
    Idle,
    Estimating,
    Synthesizing {
        quality: f64,
    },
    EncodingPrimary {
        quality: f64,
        samples: Vec<f64>,
    },
    EncodingFallback {
        quality: f64,
    },
    Success {
        quality: f64,
        audio: EncodedAudio,
    },
    Failed {
        error: PipelineError,
    },
}

impl GenerationState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GenerationState::Success { .. } | GenerationState::Failed { .. }
        )
    }

    /// State name for logging
    pub fn name(&self) -> &'static str {
        match self {
            GenerationState::Idle => "idle",
            GenerationState::Estimating => "estimating",
            GenerationState::Synthesizing { .. } => "synthesizing",
            GenerationState::EncodingPrimary { .. } => "encoding_primary",
            GenerationState::EncodingFallback { .. } => "encoding_fallback",
            GenerationState::Success { .. } => "success",
            GenerationState::Failed { .. } => "failed",
        }
    }
}

/// Per-phrase result from batch quality testing
#[derive(Debug, Clone, Serialize)]
pub struct PhraseTestResult {
    pub phrase: String,
    pub quality_score: f64,
    pub meets_target: bool,
    pub success: bool,
}

/// Summary of a batch quality test run
#[derive(Debug, Clone, Serialize)]
pub struct PhraseTestReport {
    pub results: Vec<PhraseTestResult>,
    pub total_phrases: usize,
    pub avg_quality: f64,
    pub phrases_meeting_target: usize,
    pub success_rate: f64,
}

/// Voice generation orchestrator
///
/// Stateless across requests; holds only configuration, the two encoder
/// paths, and an optional statistics sink.
pub struct VoiceGenerator {
    config: GeneratorConfig,
    primary: Arc<dyn AudioEncoder>,
    fallback: Arc<dyn AudioEncoder>,
    stats: Option<Arc<CallStats>>,
}

impl Default for VoiceGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl VoiceGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        let (primary, fallback) = encode::default_encoders();
        Self::with_encoders(config, primary, fallback)
    }

    /// Create with explicit encoder implementations (used by tests to
    /// force primary-path failures)
    pub fn with_encoders(
        config: GeneratorConfig,
        primary: Arc<dyn AudioEncoder>,
        fallback: Arc<dyn AudioEncoder>,
    ) -> Self {
        Self {
            config,
            primary,
            fallback,
            stats: None,
        }
    }

    /// Attach a statistics sink notified on every outcome
    pub fn with_stats(mut self, stats: Arc<CallStats>) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate voice audio for a validated request.
    ///
    /// Returns the encoded clip and the quality score estimated before
    /// synthesis. On terminal failure the attempt is recorded with
    /// quality 0.0 and the caller receives `FallbackFailed`.
    pub fn generate(&self, request: &GenerationRequest) -> Result<GeneratedVoice, PipelineError> {
        let mut state = GenerationState::Idle;

        loop {
            state = self.step(state, request);

            match state {
                GenerationState::Success { quality, audio } => {
                    tracing::info!(
                        quality,
                        bytes = audio.len(),
                        language = %request.language(),
                        "Generated voice for: '{}'",
                        snippet(request.text(), limits::LOG_PREVIEW_CHARS)
                    );
                    self.record(request.text(), quality, true);
                    return Ok(GeneratedVoice { audio, quality });
                }
                GenerationState::Failed { error } => {
                    tracing::error!("All generation methods failed: {}", error);
                    self.record(request.text(), 0.0, false);
                    return Err(error);
                }
                _ => continue,
            }
        }
    }

    /// Advance the state machine by one transition
    fn step(&self, state: GenerationState, request: &GenerationRequest) -> GenerationState {
        match state {
            GenerationState::Idle => GenerationState::Estimating,

            GenerationState::Estimating => {
                let quality = quality::estimate(request.text(), request.language());
                GenerationState::Synthesizing { quality }
            }

            GenerationState::Synthesizing { quality } => {
                let seed = self
                    .config
                    .noise_seed
                    .unwrap_or_else(|| text_seed(request.text()));
                let samples = synth::synthesize(request.text(), seed);
                GenerationState::EncodingPrimary { quality, samples }
            }

            GenerationState::EncodingPrimary { quality, samples } => {
                let clip = encode::quantize(&samples);
                match self.primary.encode(&clip) {
                    Ok(audio) => GenerationState::Success { quality, audio },
                    Err(e) => {
                        tracing::warn!("Primary method failed, trying fallback: {}", e);
                        GenerationState::EncodingFallback { quality }
                    }
                }
            }

            GenerationState::EncodingFallback { quality } => {
                // Quality is carried over from the initial estimate; the
                // fallback path never recomputes it
                let samples = synth::synthesize_fallback(request.text());
                let clip = encode::quantize(&samples);
                match self.fallback.encode(&clip) {
                    Ok(audio) => GenerationState::Success { quality, audio },
                    Err(e) => GenerationState::Failed {
                        error: PipelineError::FallbackFailed(e.to_string()),
                    },
                }
            }

            terminal => terminal,
        }
    }

    /// Batch-test phrases for call quality, reporting per-phrase scores
    /// and an aggregate summary.
    pub fn test_phrases(&self, phrases: &[&str], language: Language) -> PhraseTestReport {
        let mut results = Vec::with_capacity(phrases.len());
        let mut total_quality = 0.0;
        let mut successes = 0usize;

        for phrase in phrases {
            let outcome = GenerationRequest::new(*phrase, language)
                .map_err(|e| PipelineError::FallbackFailed(e.to_string()))
                .and_then(|req| self.generate(&req));

            let (quality_score, success) = match outcome {
                Ok(voice) => (voice.quality, true),
                Err(_) => (0.0, false),
            };

            if success {
                total_quality += quality_score;
                successes += 1;
            }

            results.push(PhraseTestResult {
                phrase: snippet(phrase, limits::SNIPPET_MAX_CHARS),
                quality_score,
                meets_target: quality_score >= self.config.quality_target,
                success,
            });
        }

        let avg_quality = if successes > 0 {
            total_quality / successes as f64
        } else {
            0.0
        };
        let success_rate = if results.is_empty() {
            0.0
        } else {
            successes as f64 / results.len() as f64
        };

        PhraseTestReport {
            total_phrases: results.len(),
            avg_quality,
            phrases_meeting_target: results.iter().filter(|r| r.meets_target).count(),
            success_rate,
            results,
        }
    }

    fn record(&self, text: &str, quality: f64, success: bool) {
        if let Some(stats) = &self.stats {
            stats.record(text, quality, success);
        }
    }
}

/// Stable seed derived from the request text (FNV-1a), so repeated
/// requests for the same text produce identical noise.
fn text_seed(text: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in text.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}
