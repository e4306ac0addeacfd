//! Integration tests for the authenticated request wrapper using wiremock
//!
//! These tests mock the rental API to verify token handling, the single
//! refresh-and-retry, error normalization and response decoding.

mod common;

use common::{client, logged_in_store, request_count};
use logis_client::{ApiClient, ApiConfig, ApiError, ApiRequest, HttpClientConfig, Payload};
use logis_storage::{MemoryTokenStore, StorageError, StorageResult, TokenStore, keys};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path, query_param},
};

#[tokio::test]
async fn test_no_token_sends_nothing() {
    let mock_server = MockServer::start().await;
    let api = client(&mock_server, Arc::new(MemoryTokenStore::new()));

    let err = api.houses().list().await.unwrap_err();
    assert!(matches!(err, ApiError::NotAuthenticated));

    let err = api.profile().get().await.unwrap_err();
    assert!(matches!(err, ApiError::NotAuthenticated));
    assert!(err.requires_login());

    assert_eq!(request_count(&mock_server).await, 0);
}

#[tokio::test]
async fn test_empty_tokens_are_not_a_session() {
    let mock_server = MockServer::start().await;
    let store = Arc::new(MemoryTokenStore::with_entries([
        (keys::ACCESS_TOKEN, ""),
        (keys::REFRESH_TOKEN, ""),
    ]));
    let api = client(&mock_server, store.clone());

    let err = api.houses().list().await.unwrap_err();
    assert!(matches!(err, ApiError::NotAuthenticated));
    assert!(!api.is_authenticated().unwrap());
    assert_eq!(api.claims().unwrap(), None);

    assert_eq!(request_count(&mock_server).await, 0);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_empty_refresh_token_is_not_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/maisons/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_entries([
        (keys::ACCESS_TOKEN, "stale"),
        (keys::REFRESH_TOKEN, ""),
    ]));
    let api = client(&mock_server, store.clone());

    assert!(matches!(
        api.houses().list().await.unwrap_err(),
        ApiError::SessionExpired
    ));
    assert_eq!(request_count(&mock_server).await, 1);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_bearer_and_content_type_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/maisons/"))
        .and(header("authorization", "Bearer access-1"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = client(&mock_server, logged_in_store("access-1", "refresh-1"));
    assert!(api.houses().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_401_refreshes_once_and_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/me/"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Given token not valid for any token type",
            "code": "token_not_valid"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .and(body_json(json!({ "refresh": "refresh-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access": "fresh" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/me/"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "email": "awa@example.com",
            "username": "awa",
            "first_name": "Awa",
            "last_name": "Diop",
            "telephone": "22507070707",
            "cni": "CI-0042",
            "role": "locataire"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = logged_in_store("stale", "refresh-1");
    let api = client(&mock_server, store.clone());

    let profile = api.profile().get().await.unwrap();
    assert_eq!(profile.username, "awa");

    assert_eq!(store.get(keys::ACCESS_TOKEN).unwrap().as_deref(), Some("fresh"));
    // Not rotated: the old refresh token stays
    assert_eq!(
        store.get(keys::REFRESH_TOKEN).unwrap().as_deref(),
        Some("refresh-1")
    );
    assert_eq!(request_count(&mock_server).await, 3);
}

#[tokio::test]
async fn test_rotated_refresh_token_is_stored() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/contrats/"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "fresh",
            "refresh": "refresh-2"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/contrats/"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .mount(&mock_server)
        .await;

    let store = logged_in_store("stale", "refresh-1");
    let api = client(&mock_server, store.clone());

    assert!(api.contracts().list().await.unwrap().is_empty());
    assert_eq!(
        store.get(keys::REFRESH_TOKEN).unwrap().as_deref(),
        Some("refresh-2")
    );
}

#[tokio::test]
async fn test_second_401_is_not_retried_again() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/maisons/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "User is inactive"
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access": "fresh" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = client(&mock_server, logged_in_store("stale", "refresh-1"));
    let err = api.houses().list().await.unwrap_err();

    match err {
        ApiError::Rejected { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "User is inactive");
        }
        other => panic!("expected Rejected, got {:?}", other),
    }
}

#[tokio::test]
async fn test_failed_refresh_clears_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/maisons/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Token is blacklisted"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = logged_in_store("stale", "revoked");
    let api = client(&mock_server, store.clone());

    let err = api.houses().list().await.unwrap_err();
    assert!(matches!(err, ApiError::SessionExpired));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_refresh_with_unreadable_body_clears_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/me/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&mock_server)
        .await;

    let store = logged_in_store("stale", "refresh-1");
    let api = client(&mock_server, store.clone());

    assert!(matches!(
        api.profile().get().await.unwrap_err(),
        ApiError::SessionExpired
    ));
    assert!(store.is_empty());
}

/// Store that reads and writes normally but cannot remove keys
struct StickyStore(MemoryTokenStore);

impl TokenStore for StickyStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.0.get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.0.set(key, value)
    }

    fn remove(&self, _key: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable("read-only session".to_string()))
    }
}

#[tokio::test]
async fn test_failed_refresh_is_session_expired_even_if_clear_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/maisons/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = Arc::new(StickyStore(MemoryTokenStore::with_entries([
        (keys::ACCESS_TOKEN, "stale"),
        (keys::REFRESH_TOKEN, "revoked"),
    ])));
    let api = client(&mock_server, store);

    let err = api.houses().list().await.unwrap_err();
    assert!(matches!(err, ApiError::SessionExpired));
    assert!(err.requires_login());
}

#[tokio::test]
async fn test_401_without_refresh_token_keeps_store() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/maisons/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_entries([
        (keys::ACCESS_TOKEN, "stale"),
        (keys::DISPLAY_NAME, "Awa"),
    ]));
    let api = client(&mock_server, store.clone());

    assert!(matches!(
        api.houses().list().await.unwrap_err(),
        ApiError::SessionExpired
    ));
    assert_eq!(store.len(), 2);
    assert_eq!(request_count(&mock_server).await, 1);
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let store = logged_in_store("access-1", "refresh-1");
    let api = ApiClient::new(
        ApiConfig::new(format!("http://127.0.0.1:{}/api", port)),
        store.clone(),
    )
    .unwrap();

    let err = api.houses().list().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert!(!err.requires_login());
    assert_eq!(store.len(), 3);
}

#[tokio::test]
async fn test_refresh_timeout_clears_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/maisons/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "access": "fresh" }))
                .set_delay(Duration::from_secs(3)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = logged_in_store("stale", "refresh-1");
    let api = ApiClient::new(
        ApiConfig::new(format!("{}/api", mock_server.uri()))
            .with_client_config(HttpClientConfig::default().with_timeouts(1, 1)),
        store.clone(),
    )
    .unwrap();

    assert!(matches!(
        api.houses().list().await.unwrap_err(),
        ApiError::SessionExpired
    ));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_no_content_is_empty_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/maisons/4/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = client(&mock_server, logged_in_store("access-1", "refresh-1"));
    let payload = api
        .execute(&ApiRequest::delete("/maisons/4/"))
        .await
        .unwrap();
    assert_eq!(payload, Payload::Empty);
}

#[tokio::test]
async fn test_bare_and_enveloped_lists_match() {
    let mock_server = MockServer::start().await;
    let house = json!({
        "id": 1,
        "adresse": "12 rue des Jardins, Cocody",
        "latitude": "5.359952",
        "longitude": "-3.998033",
        "description": "Maison familiale avec cour"
    });

    Mock::given(method("GET"))
        .and(path("/api/maisons/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([house.clone()])))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/maisons/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "count": 1, "results": [house] })),
        )
        .mount(&mock_server)
        .await;

    let api = client(&mock_server, logged_in_store("access-1", "refresh-1"));
    let bare = api.houses().list().await.unwrap();
    let enveloped = api.houses().list().await.unwrap();

    assert_eq!(bare.len(), 1);
    assert_eq!(bare[0].id, 1);
    assert_eq!(bare, enveloped);
}

#[tokio::test]
async fn test_unexpected_list_shape_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/chambres/"))
        .and(query_param("maison_id", "9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "detail": "ok" })))
        .mount(&mock_server)
        .await;

    let api = client(&mock_server, logged_in_store("access-1", "refresh-1"));
    assert!(api.rooms().list(9).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_field_errors_are_normalized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/contrats/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "chambre": ["Cette chambre n'est pas disponible."]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/maisons/1/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let api = client(&mock_server, logged_in_store("access-1", "refresh-1"));

    let request = ApiRequest::post("/contrats/")
        .json(&json!({ "chambre": 3 }))
        .unwrap();
    let err = api.execute(&request).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "Cette chambre n'est pas disponible.");

    let err = api.houses().get(1).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "Request failed with status 500");
}

#[tokio::test]
async fn test_non_json_success_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/me/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let api = client(&mock_server, logged_in_store("access-1", "refresh-1"));
    assert!(matches!(
        api.profile().get().await.unwrap_err(),
        ApiError::Parse(_)
    ));
}
