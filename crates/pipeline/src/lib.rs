//! Business voice synthesis pipeline
//!
//! Produces a placeholder voice clip for a piece of text along with a
//! quality estimate, so the calling system can decide whether an
//! utterance is good enough to place in a client call. The stages:
//!
//! - [`quality`] — heuristic text/language quality scoring
//! - [`synth`] — procedural speech-like waveform simulation
//! - [`encode`] — 16-bit PCM WAV serialization (in-memory and temp-file)
//! - [`generator`] — orchestration with primary/fallback method selection
//!
//! The estimator, synthesizer, and encoders are pure and re-entrant;
//! a fresh [`generator::VoiceGenerator`] run services each request with
//! no shared synthesis state.

pub mod encode;
pub mod generator;
pub mod quality;
pub mod synth;

pub use encode::{AudioEncoder, TempFileEncoder, WavEncoder};
pub use generator::{
    GeneratedVoice, GenerationState, GeneratorConfig, PhraseTestReport, PhraseTestResult,
    VoiceGenerator,
};

/// Pipeline error type
///
/// Only `FallbackFailed` crosses the pipeline boundary; the other kinds
/// are converted into state transitions inside the orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Waveform generation could not produce samples (reserved for
    /// resource exhaustion; the algorithm itself has no failure mode)
    #[error("synthesis failed: {0}")]
    SynthesisFailed(String),

    /// The container could not be constructed; recovered once via the
    /// fallback path
    #[error("encoding failed: {0}")]
    EncodingFailed(String),

    /// Both the primary and fallback paths failed
    #[error("fallback failed: {0}")]
    FallbackFailed(String),
}
