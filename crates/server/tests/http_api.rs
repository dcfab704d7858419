//! Integration tests: build the router over a real client config directory and
//! drive it with in-process requests.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;

use async_trait::async_trait;
use tier1_chatbot_config::{ClientConfig, ClientConfigStore, ConfigError, Settings};
use tier1_chatbot_server::{create_router, AppState};

fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).expect("write client config");
}

fn router_for(dir: &Path) -> Router {
    let mut settings = Settings::default();
    settings.clients.config_dir = dir.display().to_string();
    create_router(AppState::from_settings(settings))
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let resp = app.oneshot(req).await.expect("request");
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn chat_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn chat_returns_matched_response() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "acme.json",
        r#"{
            "business_name": "Acme Fitness",
            "industry": "fitness",
            "responses": {
                "hours|open": "We are open 5am to 11pm.",
                "price|cost|membership": "Memberships start at $29/month."
            },
            "contact": {"phone": "555-0100"}
        }"#,
    );

    let (status, json) = send(
        router_for(dir.path()),
        chat_request(serde_json::json!({
            "message": "When are you OPEN on Sunday?",
            "config": {"client_id": "acme"},
            "conversation_id": "conv-1"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["response"], "We are open 5am to 11pm.");
    assert_eq!(json["confidence"], 0.9);
    assert_eq!(json["booking_created"], false);
}

#[tokio::test]
async fn chat_falls_back_to_industry_template() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "smile.json",
        r#"{"industry": "Dental", "responses": {"hours": "9-5"}, "contact": {"phone": "555-0123", "website": "smile.example"}}"#,
    );

    let (status, json) = send(
        router_for(dir.path()),
        chat_request(serde_json::json!({
            "message": "is my filling supposed to hurt?",
            "config": {"client_id": "smile"}
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let response = json["response"].as_str().expect("response is string");
    assert!(response.starts_with("I don't have that information, but our staff can help!"));
    assert!(response.contains("555-0123"));
    assert!(response.contains("smile.example"));
    assert_eq!(json["confidence"], 0.9);
}

#[tokio::test]
async fn chat_unknown_client_uses_default_record() {
    let dir = tempfile::tempdir().unwrap();

    let (status, json) = send(
        router_for(dir.path()),
        chat_request(serde_json::json!({
            "message": "hello",
            "config": {"client_id": "nobody"}
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["response"],
        "Please call us at (555) 123-4567 for assistance."
    );
}

#[tokio::test]
async fn chat_without_client_id_reads_default_document() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "default.json",
        r#"{"responses": {"hello|hi": "Hi from the default client"}}"#,
    );

    let (status, json) = send(
        router_for(dir.path()),
        chat_request(serde_json::json!({"message": "hello there", "config": {}})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["response"], "Hi from the default client");
}

#[tokio::test]
async fn chat_low_confidence_when_reply_mentions_fallback() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "acme.json",
        r#"{"fallback": "Sorry, this is our fallback reply. Call {phone}.", "contact": {"phone": "555-0100"}}"#,
    );

    let (status, json) = send(
        router_for(dir.path()),
        chat_request(serde_json::json!({
            "message": "do you sell gift cards",
            "config": {"client_id": "acme"}
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["response"],
        "Sorry, this is our fallback reply. Call 555-0100."
    );
    assert_eq!(json["confidence"], 0.3);
}

#[tokio::test]
async fn chat_storage_failure_is_a_generic_server_error() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "broken.json", "{\"responses\": {");

    let (status, json) = send(
        router_for(dir.path()),
        chat_request(serde_json::json!({
            "message": "hi",
            "config": {"client_id": "broken"}
        })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "internal_error");
    assert_eq!(json["message"], "Error processing request");
    assert!(!json.to_string().contains("broken.json"));
}

struct UnreachableStore {
    default_config: ClientConfig,
}

#[async_trait]
impl ClientConfigStore for UnreachableStore {
    async fn fetch(&self, _client_id: &str) -> Result<Option<ClientConfig>, ConfigError> {
        Err(ConfigError::Storage("connection refused to 10.0.0.7".to_string()))
    }

    fn default_config(&self) -> &ClientConfig {
        &self.default_config
    }
}

#[tokio::test]
async fn unreachable_store_does_not_leak_details() {
    let store = UnreachableStore {
        default_config: ClientConfig::builtin_default(),
    };
    let app = create_router(AppState::new(Settings::default(), Arc::new(store)));

    let (status, json) = send(
        app,
        chat_request(serde_json::json!({"message": "hi", "config": {"client_id": "acme"}})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!json.to_string().contains("10.0.0.7"));
}

#[tokio::test]
async fn chat_rejects_malformed_body() {
    let dir = tempfile::tempdir().unwrap();
    let (status, _) = send(
        router_for(dir.path()),
        chat_request(serde_json::json!({"text": "missing message field"})),
    )
    .await;

    assert!(status.is_client_error(), "unexpected status {}", status);
}

#[tokio::test]
async fn health_endpoint_returns_static_payload() {
    let dir = tempfile::tempdir().unwrap();
    let (status, json) = send(router_for(dir.path()), get_request("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "tier1-chatbot");
}

#[tokio::test]
async fn client_config_endpoint_is_redacted() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "acme.json",
        r#"{
            "business_name": "Acme Fitness",
            "responses": {"hours|open": "5am-11pm", "price": "$29"},
            "contact": {"phone": "555-0100", "email": "desk@acme.example"},
            "fallback": "Secret fallback {phone}"
        }"#,
    );

    let (status, json) = send(router_for(dir.path()), get_request("/clients/acme/config")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["client_id"], "acme");
    assert_eq!(json["business_name"], "Acme Fitness");
    assert_eq!(json["available_topics"], serde_json::json!(["hours|open", "price"]));
    assert_eq!(json["has_contact"], true);

    let text = json.to_string();
    assert!(!text.contains("555-0100"));
    assert!(!text.contains("desk@acme.example"));
    assert!(!text.contains("Secret fallback"));
}

#[tokio::test]
async fn client_config_endpoint_for_unknown_and_legacy_clients() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "gym.yaml",
        "services: Yoga, Pilates\nhours: 6am-10pm\n",
    );
    write(dir.path(), "bare.json", "{}");

    let (_, unknown) = send(router_for(dir.path()), get_request("/clients/ghost/config")).await;
    assert_eq!(unknown["business_name"], "Business");
    assert_eq!(unknown["available_topics"], serde_json::json!(["default"]));
    assert_eq!(unknown["has_contact"], true);

    let (_, legacy) = send(router_for(dir.path()), get_request("/clients/gym/config")).await;
    assert_eq!(legacy["business_name"], "Unknown");
    assert_eq!(
        legacy["available_topics"],
        serde_json::json!(["services|training|classes|workout", "hours|open|time|schedule"])
    );
    assert_eq!(legacy["has_contact"], false);

    let (_, bare) = send(router_for(dir.path()), get_request("/clients/bare/config")).await;
    assert_eq!(bare["available_topics"], serde_json::json!([]));
    assert_eq!(bare["has_contact"], false);
}
