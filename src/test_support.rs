// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-process stand-in for the REST service, used by unit tests.
//!
//! Binds an axum router to `127.0.0.1:0`, records every request and answers
//! with canned `(status, body)` pairs keyed by method and path (query
//! ignored). Unknown routes get `404 {"detail":"no canned response"}`.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::to_bytes,
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;

use crate::client::ApiClient;
use crate::config::{ClientConfig, API_BASE_PATH};
use crate::session::SessionStore;

/// A request as the fake service saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path including the `/api/v1` prefix and the query string.
    pub path: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is JSON")
    }
}

#[derive(Clone)]
struct Canned {
    status: u16,
    body: String,
}

#[derive(Default)]
struct Shared {
    routes: Mutex<HashMap<(String, String), Canned>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct MockServer {
    addr: SocketAddr,
    shared: Arc<Shared>,
}

impl MockServer {
    pub async fn start() -> Self {
        let shared = Arc::new(Shared::default());
        let app = Router::new().fallback(handle).with_state(shared.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, shared }
    }

    /// Origin of a port nobody listens on.
    pub async fn closed_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::default().with_api_url(self.url())
    }

    /// Client with a fresh in-memory session.
    pub fn client(&self) -> ApiClient {
        self.client_with(SessionStore::ephemeral())
    }

    pub fn client_with(&self, session: SessionStore) -> ApiClient {
        ApiClient::new(&self.config(), session).unwrap()
    }

    /// Answer `method path` (relative to `/api/v1`) with a raw body.
    pub fn respond(&self, method: &str, path: &str, status: u16, body: impl Into<String>) {
        self.shared.routes.lock().unwrap().insert(
            (method.to_string(), format!("{API_BASE_PATH}{path}")),
            Canned {
                status,
                body: body.into(),
            },
        );
    }

    pub fn respond_json(&self, method: &str, path: &str, status: u16, body: serde_json::Value) {
        self.respond(method, path, status, body.to_string());
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.shared.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request recorded")
    }
}

async fn handle(State(shared): State<Arc<Shared>>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let body = to_bytes(body, usize::MAX).await.unwrap_or_default();
    let route = (parts.method.to_string(), parts.uri.path().to_string());
    let path = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| route.1.clone());

    shared.requests.lock().unwrap().push(RecordedRequest {
        method: route.0.clone(),
        path,
        headers: parts.headers,
        body: body.to_vec(),
    });

    let canned = shared.routes.lock().unwrap().get(&route).cloned();
    match canned {
        Some(Canned { status, body }) => {
            let status = StatusCode::from_u16(status).unwrap();
            if body.is_empty() {
                status.into_response()
            } else {
                (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
            }
        }
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            r#"{"detail":"no canned response"}"#,
        )
            .into_response(),
    }
}
