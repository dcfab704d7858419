//! Tier 1 Chatbot Server
//!
//! Provides the HTTP endpoints for the keyword chatbot.

pub mod http;
pub mod metrics;
pub mod state;

pub use crate::http::{create_router, ChatRequest, ChatResponse, ClientConfigSummary};
pub use crate::metrics::{
    init_metrics, record_config_load, record_error, record_reply, record_request,
};
pub use crate::state::AppState;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tier1_chatbot_config::ConfigError;

/// Message returned to callers for any internal failure
const GENERIC_ERROR_MESSAGE: &str = "Error processing request";

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Client config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Metrics error: {0}")]
    Metrics(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Metric label for this error
    pub fn kind(&self) -> &'static str {
        match self {
            ServerError::Config(_) => "config",
            ServerError::Metrics(_) => "metrics",
            ServerError::Internal(_) => "internal",
        }
    }
}

impl From<ServerError> for StatusCode {
    fn from(err: ServerError) -> Self {
        match err {
            ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Metrics(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// The cause is logged; callers only see a generic message.
impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, kind = self.kind(), "Request failed");
        record_error(self.kind());

        let body = Json(serde_json::json!({
            "error": "internal_error",
            "message": GENERIC_ERROR_MESSAGE,
        }));
        (StatusCode::from(self), body).into_response()
    }
}
