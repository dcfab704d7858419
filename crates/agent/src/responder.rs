//! Reply selection for one message against one client record

use tier1_chatbot_config::ClientConfig;

use crate::confidence::Confidence;
use crate::fallback::fallback_response;
use crate::matcher::ResponseTable;

/// Where a reply came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplySource {
    /// A configured pattern matched
    Matched { pattern: String },
    /// No pattern matched
    Fallback,
}

impl ReplySource {
    /// Short label for logs and metrics
    pub fn label(&self) -> &'static str {
        match self {
            Self::Matched { .. } => "matched",
            Self::Fallback => "fallback",
        }
    }
}

/// Reply text with its confidence label
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub confidence: Confidence,
    pub source: ReplySource,
}

/// Pick the reply for a message
pub fn respond(message: &str, config: &ClientConfig) -> Reply {
    let table = ResponseTable::from_config(config);

    let (text, source) = match table.find(message) {
        Some(rule) => (
            rule.response.clone(),
            ReplySource::Matched {
                pattern: rule.pattern.clone(),
            },
        ),
        None => (fallback_response(config), ReplySource::Fallback),
    };

    let confidence = Confidence::for_response(&text);
    tracing::trace!(source = source.label(), ?confidence, "Selected reply");

    Reply {
        text,
        confidence,
        source,
    }
}

/// Reply text only
pub fn match_response(message: &str, config: &ClientConfig) -> String {
    respond(message, config).text
}
