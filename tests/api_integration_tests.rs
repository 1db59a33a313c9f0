use agri_sahayak::api::{AdvisoryApi, AlertSeverity, ApiError, HttpAdvisoryApi};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helper Functions
// ============================================================================

fn client_for(server: &MockServer) -> HttpAdvisoryApi {
    HttpAdvisoryApi::new(Some(server.uri()))
}

// ============================================================================
// Profile
// ============================================================================

#[tokio::test]
async fn test_fetch_profile_unwraps_user_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user": { "name": "Asha Devi", "email": "asha@example.com" }
        })))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let profile = api.fetch_profile("u1").await.unwrap();
    assert_eq!(profile.name.as_deref(), Some("Asha Devi"));
    assert_eq!(profile.email.as_deref(), Some("asha@example.com"));
}

#[tokio::test]
async fn test_fetch_profile_tolerates_missing_user_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let profile = api.fetch_profile("u1").await.unwrap();
    assert!(profile.name.is_none());
    assert!(profile.email.is_none());
}

// ============================================================================
// Conversations
// ============================================================================

#[tokio::test]
async fn test_list_conversations_parses_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/u1/conversations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "conversations": [
                { "conversation_id": "c1", "title": "Wheat advice",
                  "timestamp": "2025-06-01T10:00:00Z" },
                { "conversation_id": "c2" }
            ]
        })))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let conversations = api.list_conversations("u1").await.unwrap();
    assert_eq!(conversations.len(), 2);
    assert_eq!(conversations[0].title.as_deref(), Some("Wheat advice"));
    assert!(conversations[1].title.is_none());
}

#[tokio::test]
async fn test_list_conversations_maps_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/u1/conversations"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let err = api.list_conversations("u1").await.unwrap_err();
    match err {
        ApiError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_delete_conversation_hits_delete_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/conversations/c1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server);
    api.delete_conversation("c1").await.unwrap();
}

#[tokio::test]
async fn test_delete_conversation_surfaces_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/conversations/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such conversation"))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let err = api.delete_conversation("missing").await.unwrap_err();
    match err {
        ApiError::Api { status, .. } => assert_eq!(status, 404),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rename_conversation_patches_title_body() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/conversations/c1"))
        .and(body_json(serde_json::json!({ "title": "Wheat fertilizer" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server);
    api.rename_conversation("c1", "Wheat fertilizer").await.unwrap();
}

// ============================================================================
// Logout
// ============================================================================

#[tokio::test]
async fn test_logout_posts_user_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/logout"))
        .and(body_json(serde_json::json!({ "user_id": "u1" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server);
    api.logout("u1").await.unwrap();
}

// ============================================================================
// Weather Alerts
// ============================================================================

#[tokio::test]
async fn test_fetch_weather_alerts_parses_batch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather-alerts/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "alerts": [
                { "severity": "high", "icon": "⛈", "title": "Heavy rainfall",
                  "message": "Protect harvested crops", "district": "Ludhiana",
                  "timestamp": "2025-06-01T10:00:00Z" },
                { "severity": "unusual-value", "timestamp": "2025-06-01T11:00:00Z" }
            ],
            "last_updated": "2025-06-01T12:00:00Z"
        })))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let batch = api.fetch_weather_alerts("u1").await.unwrap();
    assert_eq!(batch.alerts.len(), 2);
    assert_eq!(batch.alerts[0].severity, AlertSeverity::High);
    // Unrecognized severities degrade to the mildest presentation
    assert_eq!(batch.alerts[1].severity, AlertSeverity::Low);
    assert_eq!(batch.last_updated.as_deref(), Some("2025-06-01T12:00:00Z"));
}

#[tokio::test]
async fn test_fetch_weather_alerts_empty_batch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather-alerts/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "alerts": []
        })))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let batch = api.fetch_weather_alerts("u1").await.unwrap();
    assert!(batch.alerts.is_empty());
    assert!(batch.last_updated.is_none());
}

// ============================================================================
// Price History
// ============================================================================

#[tokio::test]
async fn test_fetch_price_history_parses_series() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/market-price-history/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "crop": "wheat",
            "price_history": [
                { "date": "2025-06-01", "price": 2150.0 },
                { "date": "2025-06-02", "price": 2175.5 }
            ]
        })))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let history = api.fetch_price_history("u1").await.unwrap();
    assert_eq!(history.crop.as_deref(), Some("wheat"));
    assert_eq!(history.price_history.len(), 2);
    assert_eq!(history.price_history[1].price, 2175.5);
}

#[tokio::test]
async fn test_network_failure_maps_to_network_error() {
    // Point at a server that was already shut down
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let api = HttpAdvisoryApi::new(Some(uri));
    let err = api.fetch_price_history("u1").await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}
