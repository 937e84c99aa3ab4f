// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Generic request pipeline.
//!
//! One call to [`RequestEngine::execute`] is one logical API call:
//!
//! 1. Compose headers: JSON content type, then caller headers (which may
//!    override it), then the bearer token when a session is active. The
//!    `Authorization` header is always engine-controlled.
//! 2. Dispatch against `<origin>/api/v1<path>`.
//! 3. Classify the response:
//!    - `401` clears the session, emits [`SessionEvent::Expired`] and fails
//!      with [`ClientError::Unauthorized`] without reading the body.
//!    - any other non-2xx fails with [`ClientError::Http`], message taken
//!      from `detail`, then `message`, then `HTTP <status>`.
//!    - `204` yields the "no content" value of `T` without reading the body.
//!    - any other 2xx decodes the body as `T`.
//!
//! Transport failures pass through as [`ClientError::Transport`]. Nothing is
//! retried.
//!
//! [`SessionEvent::Expired`]: crate::session::SessionEvent::Expired

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::SessionStore;

/// Version of the crate, used in the User-Agent header.
const VERSION: &str = env!("CARGO_PKG_VERSION");

const JSON: &str = "application/json";

// =============================================================================
// Request Options
// =============================================================================

/// Method, body and extra headers for one call.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    method: Method,
    body: Option<Vec<u8>>,
    headers: HeaderMap,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            body: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    pub fn post<B: Serialize + ?Sized>(body: &B) -> ClientResult<Self> {
        Self::new(Method::POST).json(body)
    }

    pub fn patch<B: Serialize + ?Sized>(body: &B) -> ClientResult<Self> {
        Self::new(Method::PATCH).json(body)
    }

    /// Serialize `body` as the JSON payload.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ClientResult<Self> {
        self.body = Some(serde_json::to_vec(body).map_err(ClientError::Encode)?);
        Ok(self)
    }

    /// Add a caller header. A caller `Authorization` header is discarded at
    /// dispatch time.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Executes API calls on behalf of every resource client.
#[derive(Debug, Clone)]
pub struct RequestEngine {
    http: Client,
    base_url: String,
    login_path: String,
    session: SessionStore,
}

impl RequestEngine {
    pub fn new(config: &ClientConfig, session: SessionStore) -> ClientResult<Self> {
        config.validate()?;
        let http = Client::builder()
            .user_agent(format!("agentwallet-console/{VERSION}"))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url(),
            login_path: config.login_path.clone(),
            session,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// `<origin>/api/v1`, the prefix every path is resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute one call and decode the result as `T`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ClientResult<T> {
        let RequestOptions {
            method,
            body,
            headers,
        } = options;

        let headers = self.compose_headers(headers)?;
        let url = format!("{}{}", self.base_url, path);

        debug!(method = %method, path, "Dispatching API request");
        let mut request = self.http.request(method, url).headers(headers);
        if let Some(body) = body {
            request = request.body(body);
        }
        let response = request.send().await?;

        self.classify(path, response).await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.execute(path, RequestOptions::get()).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(path, RequestOptions::post(body)?).await
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(path, RequestOptions::patch(body)?).await
    }

    /// Any 2xx counts as success; whatever body came back is discarded.
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let _: IgnoredAny = self.execute(path, RequestOptions::delete()).await?;
        Ok(())
    }

    fn compose_headers(&self, caller: HeaderMap) -> ClientResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
        headers.extend(caller);
        headers.remove(AUTHORIZATION);

        if let Some(token) = self.session.get() {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ClientError::InvalidHeader("authorization".to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    async fn classify<T: DeserializeOwned>(
        &self,
        path: &str,
        response: Response,
    ) -> ClientResult<T> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!(path, "Session rejected by the service, signing out");
            self.session.expire(&self.login_path);
            return Err(ClientError::Unauthorized);
        }

        if !status.is_success() {
            let body = best_effort_body(response).await;
            let message = error_message(status, &body);
            warn!(path, status = status.as_u16(), %message, "API request failed");
            return Err(ClientError::Http { status, message });
        }

        if status == StatusCode::NO_CONTENT {
            return serde_json::from_value(Value::Null)
                .map_err(|source| ClientError::Decode { status, source });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|source| ClientError::Decode { status, source })
    }
}

/// Decode an error body as a JSON object, or an empty one if it is anything else.
async fn best_effort_body(response: Response) -> Map<String, Value> {
    let Ok(bytes) = response.bytes().await else {
        return Map::new();
    };
    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// `detail`, else `message`, else `HTTP <status>`.
fn error_message(status: StatusCode, body: &Map<String, Value>) -> String {
    ["detail", "message"]
        .iter()
        .find_map(|key| body.get(*key).and_then(message_text))
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

/// Usable text of a message field. Null, `false` and empty strings don't count.
fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        // Structured details (e.g. validation error lists) are kept as JSON.
        other => Some(other.to_string()),
    }
}
