//! Centralized constants for the business voice system
//!
//! Single source of truth for audio parameters, quality scoring weights,
//! and input limits. Components must read these instead of hardcoding
//! their own copies.

/// Audio output parameters
pub mod audio {
    /// PCM sample rate for all generated audio (Hz)
    pub const SAMPLE_RATE: u32 = 22050;

    /// Mono output
    pub const CHANNELS: u16 = 1;

    /// 16-bit signed PCM
    pub const BITS_PER_SAMPLE: u16 = 16;

    /// Seconds of audio per character of input text
    pub const SECONDS_PER_CHAR: f64 = 0.08;

    /// Minimum clip duration regardless of text length (seconds)
    pub const MIN_DURATION_SECS: f64 = 1.5;
}

/// Quality estimation weights
///
/// The score is additive: base plus bonuses, clamped to 1.0. The weights
/// are tuned so that a keyword-rich English phrase clears the 80% target.
pub mod quality {
    /// Starting score before any bonus
    pub const BASE_SCORE: f64 = 0.75;

    /// Bonus when the text is longer than [`OPTIMAL_LENGTH_CHARS`]
    pub const LENGTH_BONUS: f64 = 0.05;

    /// Text length above which clarity is considered optimal
    pub const OPTIMAL_LENGTH_CHARS: usize = 10;

    /// Bonus for pure English text (current fine-tuning focus)
    pub const ENGLISH_BONUS: f64 = 0.10;

    /// Bonus for Hindi-English code switching
    pub const MIXED_BONUS: f64 = 0.05;

    /// Bonus when the text contains any business keyword
    pub const KEYWORD_BONUS: f64 = 0.08;

    /// Quality target for professional client calls
    pub const TARGET: f64 = 0.80;

    /// Phrases the voice model is optimized for; matched case-insensitively
    /// as substrings
    pub const BUSINESS_KEYWORDS: [&str; 15] = [
        "account",
        "service",
        "update",
        "company",
        "business",
        "professional",
        "client",
        "meeting",
        "call",
        "support",
        "regarding",
        "thank",
        "appreciate",
        "follow",
        "courtesy",
    ];
}

/// Input and reporting limits
pub mod limits {
    /// Maximum request text length (characters, after trimming)
    pub const MAX_TEXT_CHARS: usize = 1000;

    /// Call-log snippet length (characters before truncation)
    pub const SNIPPET_MAX_CHARS: usize = 100;

    /// Text preview length in generation log lines
    pub const LOG_PREVIEW_CHARS: usize = 50;

    /// Number of recent calls exposed in a stats snapshot
    pub const RECENT_CALLS_WINDOW: usize = 10;
}
