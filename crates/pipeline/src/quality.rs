//! Heuristic voice quality estimation
//!
//! Maps text and language to a score in `[0.0, 1.0]` before any audio is
//! generated. The weighting is additive and tuned for the 80% business
//! call target: keyword-rich English phrases clear it, short plain Hindi
//! text sits at the base score.

use business_voice_core::constants::quality;
use business_voice_core::Language;

/// Estimate the voice quality score for a business call.
///
/// Deterministic and side-effect free; always returns a value in
/// `[0.75, 1.0]`.
pub fn estimate(text: &str, language: Language) -> f64 {
    let mut score = quality::BASE_SCORE;

    // Optimal length for clarity
    if text.chars().count() > quality::OPTIMAL_LENGTH_CHARS {
        score += quality::LENGTH_BONUS;
    }

    score += match language {
        Language::English => quality::ENGLISH_BONUS,
        Language::Mixed => quality::MIXED_BONUS,
        Language::Hindi => 0.0,
    };

    // Business phrase optimization
    let lowered = text.to_lowercase();
    if quality::BUSINESS_KEYWORDS
        .iter()
        .any(|kw| lowered.contains(kw))
    {
        score += quality::KEYWORD_BONUS;
    }

    score.min(1.0)
}
