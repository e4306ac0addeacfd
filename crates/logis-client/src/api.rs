//! Authenticated request wrapper
//!
//! Every resource call goes through [`ApiClient::execute`]:
//! 1. No stored access token: fail with `NotAuthenticated` before any I/O.
//! 2. Send with `Authorization: Bearer <access>`.
//! 3. On 401, refresh the access token once and replay the request once.
//! 4. Other non-2xx statuses become `Rejected` with the server's message.
//! 5. 204 (or an empty body) is `Payload::Empty`; anything else is parsed as JSON.

use crate::{
    ApiError, Result,
    catalogue::Catalogue,
    client::{HttpClientConfig, create_client},
    contracts::Contracts,
    error::error_message,
    houses::Houses,
    profile::ProfileClient,
    rooms::Rooms,
};
use logis_storage::{Session, TokenStore, keys};
use reqwest::{
    Client, Method, Response, StatusCode, Url,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Default API root of a local development server
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// API client configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// API root, e.g. `https://rent.example.com/api`
    pub base_url: String,

    /// HTTP client configuration
    pub client_config: HttpClientConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client_config: HttpClientConfig::default(),
        }
    }

    pub fn with_client_config(mut self, client_config: HttpClientConfig) -> Self {
        self.client_config = client_config;
        self
    }
}

/// One API call, replayable after a token refresh
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Attach a JSON body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::Parse(format!("Failed to serialize request body: {}", e)))?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

/// Successful response body
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// 204, or a 2xx with no body
    Empty,
    Json(Value),
}

impl Payload {
    pub fn is_empty(&self) -> bool {
        matches!(self, Payload::Empty)
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Payload::Empty => None,
            Payload::Json(value) => Some(value),
        }
    }

    /// Deserialize the body; an empty payload is [`ApiError::EmptyResponse`]
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T> {
        match self {
            Payload::Empty => Err(ApiError::EmptyResponse),
            Payload::Json(value) => serde_json::from_value(value)
                .map_err(|e| ApiError::Parse(format!("Unexpected response shape: {}", e))),
        }
    }

    /// Deserialize the body if there is one
    pub fn into_optional<T: DeserializeOwned>(self) -> Result<Option<T>> {
        match self {
            Payload::Empty => Ok(None),
            json => json.into_typed().map(Some),
        }
    }

    /// Normalize a list response (bare array or `results` envelope)
    pub fn into_list<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        match self {
            Payload::Empty => Ok(Vec::new()),
            Payload::Json(value) => Ok(logis_core::normalize_list(value)?),
        }
    }
}

/// Whether this is the first send of a request or its single replay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    First,
    Retried,
}

/// Client for the rental API, bound to one token store
pub struct ApiClient {
    config: ApiConfig,
    base_url: Url,
    http: Client,
    store: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(config: ApiConfig, store: Arc<dyn TokenStore>) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        let http = create_client(&config.client_config)?;
        Ok(Self {
            config,
            base_url,
            http,
            store,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn store(&self) -> &dyn TokenStore {
        self.store.as_ref()
    }

    pub fn houses(&self) -> Houses<'_> {
        Houses::new(self)
    }

    pub fn rooms(&self) -> Rooms<'_> {
        Rooms::new(self)
    }

    pub fn contracts(&self) -> Contracts<'_> {
        Contracts::new(self)
    }

    pub fn profile(&self) -> ProfileClient<'_> {
        ProfileClient::new(self)
    }

    pub fn catalogue(&self) -> Catalogue<'_> {
        Catalogue::new(self)
    }

    /// Absolute URL for an API path such as `/maisons/3/`
    pub fn url(&self, path: &str, query: &[(String, String)]) -> Result<Url> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::Config(format!("Invalid API path '{}': {}", path, e)))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Issue an authenticated request, refreshing the token at most once
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn execute(&self, request: &ApiRequest) -> Result<Payload> {
        let mut attempt = Attempt::First;
        loop {
            let access = Session::token(self.store(), keys::ACCESS_TOKEN)?
                .ok_or(ApiError::NotAuthenticated)?;

            let response = self.send(request, &access).await?;
            let status = response.status();
            debug!("{} {} -> {}", request.method, request.path, status);

            if status == StatusCode::UNAUTHORIZED && attempt == Attempt::First {
                debug!("Access token rejected, refreshing");
                self.refresh_access_token().await?;
                attempt = Attempt::Retried;
                continue;
            }

            return into_payload(response).await;
        }
    }

    async fn send(&self, request: &ApiRequest, access: &str) -> Result<Response> {
        let url = self.url(&request.path, &request.query)?;
        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .header(AUTHORIZATION, format!("Bearer {}", access))
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        Ok(builder.send().await?)
    }

    /// POST a JSON body to an endpoint that needs no token
    pub(crate) async fn post_public<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response> {
        let url = self.url(path, &[])?;
        debug!("POST {} (public)", path);
        Ok(self.http.post(url).json(body).send().await?)
    }
}

/// Read a successful response into a payload, or turn a failure into `Rejected`
async fn into_payload(response: Response) -> Result<Payload> {
    let status = response.status();

    if !status.is_success() {
        let body = response.bytes().await.unwrap_or_default();
        let fallback = format!("Request failed with status {}", status.as_u16());
        return Err(ApiError::Rejected {
            status: status.as_u16(),
            message: error_message(&body, &fallback),
        });
    }

    if status == StatusCode::NO_CONTENT {
        return Ok(Payload::Empty);
    }

    let body = response.bytes().await?;
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Payload::Empty);
    }

    serde_json::from_slice(&body)
        .map(Payload::Json)
        .map_err(|e| ApiError::Parse(format!("Response body is not JSON: {}", e)))
}

/// Read a public endpoint's JSON response, mapping failures with `fallback`
pub(crate) async fn read_public<T: DeserializeOwned>(
    response: Response,
    fallback: &str,
) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.bytes().await.unwrap_or_default();
        return Err(ApiError::Rejected {
            status: status.as_u16(),
            message: error_message(&body, fallback),
        });
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parse(format!("Unexpected response shape: {}", e)))
}

/// Parse the base URL, making sure it ends with `/` so paths join below it
fn parse_base_url(base_url: &str) -> Result<Url> {
    let trimmed = base_url.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };
    let url = Url::parse(&with_slash)
        .map_err(|e| ApiError::Config(format!("Invalid API base URL '{}': {}", base_url, e)))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::Config(format!(
            "API base URL '{}' cannot hold paths",
            base_url
        )));
    }
    Ok(url)
}
