//! Core types for the business voice pipeline
//!
//! Shared between the synthesis pipeline and the monitoring layer:
//! - Request validation (`GenerationRequest`, `Language`)
//! - Audio value types (`AudioClip`, `EncodedAudio`)
//! - Centralized constants (sample rate, quality weights, limits)

pub mod audio;
pub mod constants;
pub mod request;
pub mod text;

pub use audio::{AudioClip, EncodedAudio};
pub use request::{GenerationRequest, Language, RequestError};
pub use text::snippet;
