//! Common test utilities for client integration tests

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use logis_client::{ApiClient, ApiConfig};
use logis_storage::{MemoryTokenStore, TokenStore, keys};
use std::sync::Arc;
use wiremock::MockServer;

/// Unsigned JWT carrying the given claims
#[allow(dead_code)]
pub fn token(claims: serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{}.{}.signature", header, payload)
}

/// Client rooted at `<mock>/api` over the given store
#[allow(dead_code)]
pub fn client(server: &MockServer, store: Arc<dyn TokenStore>) -> ApiClient {
    ApiClient::new(ApiConfig::new(format!("{}/api", server.uri())), store).unwrap()
}

/// Store holding an access/refresh pair and a display name
#[allow(dead_code)]
pub fn logged_in_store(access: &str, refresh: &str) -> Arc<MemoryTokenStore> {
    Arc::new(MemoryTokenStore::with_entries([
        (keys::ACCESS_TOKEN, access),
        (keys::REFRESH_TOKEN, refresh),
        (keys::DISPLAY_NAME, "Awa"),
    ]))
}

#[allow(dead_code)]
pub async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.unwrap_or_default().len()
}
