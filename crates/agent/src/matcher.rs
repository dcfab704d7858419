//! Keyword pattern matching
//!
//! A pattern key is a pipe-delimited list of keyword alternatives. A message
//! matches a pattern when its lower-cased text contains any alternative as a
//! substring. Rules are tried in configured order and the first match wins;
//! there is no scoring between several matching rules.
//!
//! Alternatives that are empty after trimming (`"hours|"`, `"| |"`) never
//! match. Without this guard the empty string would be a substring of every
//! message and a malformed key would swallow all traffic.

use tier1_chatbot_config::ClientConfig;

/// One pattern and the response it answers with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseRule {
    /// Pattern key as configured
    pub pattern: String,
    /// Lower-cased, trimmed, non-empty alternatives
    keywords: Vec<String>,
    /// Response text
    pub response: String,
}

impl ResponseRule {
    pub fn new(pattern: impl Into<String>, response: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let keywords = pattern
            .split('|')
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        Self {
            pattern,
            keywords,
            response: response.into(),
        }
    }

    /// Usable alternatives of this rule
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Whether an already lower-cased message satisfies any alternative
    pub fn matches(&self, message_lower: &str) -> bool {
        self.keywords.iter().any(|k| message_lower.contains(k.as_str()))
    }
}

/// Ordered response rules of one client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseTable {
    rules: Vec<ResponseRule>,
}

impl ResponseTable {
    /// Build the table from a client's canonical pattern entries
    pub fn from_config(config: &ClientConfig) -> Self {
        config
            .response_entries()
            .into_iter()
            .map(|(pattern, response)| ResponseRule::new(pattern, response))
            .collect()
    }

    pub fn rules(&self) -> &[ResponseRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Pattern keys in match order
    pub fn patterns(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.pattern.as_str()).collect()
    }

    /// First rule matching the message (case-insensitive)
    pub fn find(&self, message: &str) -> Option<&ResponseRule> {
        let message_lower = message.to_lowercase();
        self.rules.iter().find(|rule| rule.matches(&message_lower))
    }
}

impl FromIterator<ResponseRule> for ResponseTable {
    fn from_iter<I: IntoIterator<Item = ResponseRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
