//! HTTP Endpoints
//!
//! REST API for the chatbot.

use axum::{
    extract::{Json, Path, State},
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method, StatusCode,
    },
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::time::{Duration, Instant};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use tier1_chatbot_agent::{respond, ResponseTable};
use tier1_chatbot_config::constants::{default_client, server};

use crate::metrics::{metrics_handler, record_config_load, record_reply, record_request};
use crate::state::AppState;
use crate::ServerError;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let server_config = &state.settings.server;
    let cors_layer = build_cors_layer(&server_config.cors_origins, server_config.cors_enabled);
    let timeout = Duration::from_secs(server_config.timeout_seconds);

    Router::new()
        .route("/chat", post(chat))
        .route("/health", get(health_check))
        .route("/clients/:client_id/config", get(client_config))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout))
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false or no origins are configured, any origin is allowed
/// - Otherwise only the configured origins are allowed
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    let any_origin = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    if !enabled || origins.is_empty() || origins.iter().any(|o| o == "*") {
        tracing::info!("CORS allows any origin");
        return any_origin;
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::error!("All configured CORS origins are invalid, allowing any origin");
        return any_origin;
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE])
        .allow_credentials(true)
}

/// Chat request
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatRequest {
    pub message: String,
    /// Widget configuration; only `client_id` is read
    pub config: Map<String, JsonValue>,
    /// Accepted for compatibility; no conversation state is kept
    #[serde(default)]
    pub conversation_id: Option<String>,
}

impl ChatRequest {
    /// Client id from `config.client_id`, `"default"` when missing or not a string
    pub fn client_id(&self) -> &str {
        self.config
            .get("client_id")
            .and_then(JsonValue::as_str)
            .unwrap_or(default_client::CLIENT_ID)
    }
}

/// Chat response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub confidence: f64,
    /// Booking is not supported by this tier
    pub booking_created: bool,
}

/// Chat endpoint
async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ServerError> {
    let client_id = request.client_id();

    let started = Instant::now();
    let config = state.store.load_config(client_id).await?;
    record_config_load(started.elapsed());

    let reply = respond(&request.message, &config);
    record_reply(reply.source.label());
    record_request("chat", StatusCode::OK);

    tracing::debug!(
        client_id = %client_id,
        conversation_id = ?request.conversation_id,
        source = reply.source.label(),
        confidence = reply.confidence.score(),
        "Chat reply"
    );

    Ok(Json(ChatResponse {
        response: reply.text,
        confidence: reply.confidence.score(),
        booking_created: false,
    }))
}

/// Liveness check
async fn health_check() -> Json<JsonValue> {
    record_request("health", StatusCode::OK);
    Json(serde_json::json!({
        "status": "healthy",
        "service": server::SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Redacted view of a client's resolved record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfigSummary {
    pub client_id: String,
    pub business_name: String,
    pub available_topics: Vec<String>,
    pub has_contact: bool,
}

/// Client config debug endpoint
///
/// GET /clients/:client_id/config
///
/// Never exposes fallback templates or contact values.
async fn client_config(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<Json<ClientConfigSummary>, ServerError> {
    let config = state.store.load_config(&client_id).await?;
    let table = ResponseTable::from_config(&config);
    record_request("client_config", StatusCode::OK);

    Ok(Json(ClientConfigSummary {
        business_name: config
            .business_name
            .clone()
            .unwrap_or_else(|| "Unknown".to_string()),
        available_topics: table.patterns().into_iter().map(str::to_string).collect(),
        has_contact: config.has_contact(),
        client_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tier1_chatbot_config::Settings;

    #[test]
    fn test_router_creation() {
        let state = AppState::from_settings(Settings::default());
        let _ = create_router(state);
    }

    #[test]
    fn test_router_creation_with_origins() {
        let mut settings = Settings::default();
        settings.server.cors_origins = vec![
            "https://example.com".to_string(),
            "not a header\nvalue".to_string(),
        ];
        let _ = create_router(AppState::from_settings(settings));
    }

    #[test]
    fn test_client_id_extraction() {
        let request: ChatRequest = serde_json::from_value(serde_json::json!({
            "message": "hi",
            "config": {"client_id": "acme", "theme": "dark"}
        }))
        .unwrap();
        assert_eq!(request.client_id(), "acme");
        assert_eq!(request.conversation_id, None);

        let request: ChatRequest = serde_json::from_value(serde_json::json!({
            "message": "hi",
            "config": {"client_id": 7},
            "conversation_id": "c-1"
        }))
        .unwrap();
        assert_eq!(request.client_id(), "default");
        assert_eq!(request.conversation_id.as_deref(), Some("c-1"));
    }
}
