//! Tier 1 chatbot reply engine
//!
//! Features:
//! - Ordered, case-insensitive keyword pattern matching
//! - Industry-aware fallback templates with contact placeholders
//! - Heuristic confidence labels
//!
//! Everything here is a pure function of the message and the client record.
//! No state is kept between calls.

pub mod confidence;
pub mod fallback;
pub mod matcher;
pub mod responder;

pub use confidence::Confidence;
pub use fallback::{fallback_response, fallback_template, Industry, ResolvedContact};
pub use matcher::{ResponseRule, ResponseTable};
pub use responder::{match_response, respond, Reply, ReplySource};
