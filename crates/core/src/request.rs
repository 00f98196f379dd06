//! Generation request validation
//!
//! All callers construct a [`GenerationRequest`] before invoking the
//! pipeline, so empty or over-length text is rejected at the boundary and
//! the pipeline itself only ever sees valid input.

use serde::{Deserialize, Serialize};

use crate::constants::limits;

/// Language mode for a generation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Pure English (current fine-tuning focus, highest quality)
    #[default]
    English,
    /// Pure Hindi
    Hindi,
    /// Hindi-English code switching
    Mixed,
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Language::English => "english",
            Language::Hindi => "hindi",
            Language::Mixed => "mixed",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for Language {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "english" => Ok(Language::English),
            "hindi" => Ok(Language::Hindi),
            "mixed" => Ok(Language::Mixed),
            other => Err(RequestError::InvalidInput(format!(
                "unknown language: {}",
                other
            ))),
        }
    }
}

/// Request validation error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// A validated voice generation request
///
/// Holds trimmed, non-empty text of at most
/// [`limits::MAX_TEXT_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    text: String,
    language: Language,
}

impl GenerationRequest {
    /// Validate and build a request.
    ///
    /// Text is trimmed; empty or over-length text is rejected with
    /// [`RequestError::InvalidInput`].
    pub fn new(text: impl Into<String>, language: Language) -> Result<Self, RequestError> {
        let text = text.into();
        let trimmed = text.trim();

        if trimmed.is_empty() {
            return Err(RequestError::InvalidInput("text is required".to_string()));
        }

        let chars = trimmed.chars().count();
        if chars > limits::MAX_TEXT_CHARS {
            return Err(RequestError::InvalidInput(format!(
                "text too long ({} characters, max {})",
                chars,
                limits::MAX_TEXT_CHARS
            )));
        }

        Ok(Self {
            text: trimmed.to_string(),
            language,
        })
    }

    /// Validate with the default language (English)
    pub fn with_default_language(text: impl Into<String>) -> Result<Self, RequestError> {
        Self::new(text, Language::default())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language(&self) -> Language {
        self.language
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_valid_request() {
        let req = GenerationRequest::new("Hello there", Language::English).unwrap();
        assert_eq!(req.text(), "Hello there");
        assert_eq!(req.language(), Language::English);
    }

    #[test]
    fn test_text_is_trimmed() {
        let req = GenerationRequest::new("  Hello  ", Language::Hindi).unwrap();
        assert_eq!(req.text(), "Hello");
    }

    #[test]
    fn test_empty_text_rejected() {
        assert!(GenerationRequest::new("", Language::English).is_err());
        assert!(GenerationRequest::new("   ", Language::English).is_err());
    }

    #[test]
    fn test_over_length_text_rejected() {
        let text = "a".repeat(1001);
        let err = GenerationRequest::new(text, Language::English).unwrap_err();
        assert!(matches!(err, RequestError::InvalidInput(_)));

        // Exactly at the limit is fine
        let text = "a".repeat(1000);
        assert!(GenerationRequest::new(text, Language::English).is_ok());
    }

    #[test]
    fn test_language_default_is_english() {
        assert_eq!(Language::default(), Language::English);
        let req = GenerationRequest::with_default_language("Hello").unwrap();
        assert_eq!(req.language(), Language::English);
    }

    #[test]
    fn test_language_parsing() {
        assert_eq!(Language::from_str("english").unwrap(), Language::English);
        assert_eq!(Language::from_str("hindi").unwrap(), Language::Hindi);
        assert_eq!(Language::from_str("mixed").unwrap(), Language::Mixed);
        assert!(Language::from_str("french").is_err());
    }

    #[test]
    fn test_language_serde_lowercase() {
        let json = serde_json::to_string(&Language::Mixed).unwrap();
        assert_eq!(json, "\"mixed\"");
        let lang: Language = serde_json::from_str("\"hindi\"").unwrap();
        assert_eq!(lang, Language::Hindi);
    }
}
