//! Confidence labels
//!
//! The label is a function of the reply text alone: text mentioning
//! "fallback" (any case) is low confidence, everything else high. A matched
//! response that happens to contain the word is therefore labeled low too.

use serde::Serialize;
use tier1_chatbot_config::constants::confidence;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Low,
}

impl Confidence {
    pub fn for_response(text: &str) -> Self {
        if text.to_lowercase().contains(confidence::FALLBACK_MARKER) {
            Self::Low
        } else {
            Self::High
        }
    }

    /// Numeric score reported to callers
    pub fn score(&self) -> f64 {
        match self {
            Self::High => confidence::HIGH,
            Self::Low => confidence::LOW,
        }
    }
}
