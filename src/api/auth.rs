// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication: sign in, register, sign out.
//!
//! A successful login or registration stores the returned access token in
//! the session, so every following call carries it. Logout never touches
//! the network.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::client::RequestEngine;
use crate::error::ClientResult;

/// Credentials for `POST /auth/login`.
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Account details for `POST /auth/register`.
#[derive(Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub organization_name: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("organization_name", &self.organization_name)
            .finish()
    }
}

/// The signed-in operator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub organization_id: String,
}

/// Token issued by login or registration. The token is opaque.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: AuthUser,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

pub struct AuthApi<'a> {
    engine: &'a RequestEngine,
}

impl<'a> AuthApi<'a> {
    pub fn new(engine: &'a RequestEngine) -> Self {
        Self { engine }
    }

    /// Sign in and start a session with the issued token.
    pub async fn login(&self, credentials: &LoginRequest) -> ClientResult<AuthResponse> {
        let response: AuthResponse = self.engine.post("/auth/login", credentials).await?;
        self.engine
            .session()
            .set(Some(response.access_token.clone()))?;
        Ok(response)
    }

    /// Create an account and start a session with the issued token.
    pub async fn register(&self, details: &RegisterRequest) -> ClientResult<AuthResponse> {
        let response: AuthResponse = self.engine.post("/auth/register", details).await?;
        self.engine
            .session()
            .set(Some(response.access_token.clone()))?;
        Ok(response)
    }

    /// Forget the current credential locally.
    pub fn logout(&self) -> ClientResult<()> {
        self.engine.session().clear()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{SessionEvent, SessionStore};
    use crate::test_support::MockServer;
    use serde_json::json;

    fn auth_body(token: &str) -> serde_json::Value {
        json!({
            "access_token": token,
            "token_type": "bearer",
            "user": {"id": "u1", "email": "ops@example.com", "organization_id": "org1"}
        })
    }

    #[tokio::test]
    async fn login_stores_token_for_later_calls() {
        let server = MockServer::start().await;
        server.respond_json("POST", "/auth/login", 200, auth_body("tok123"));
        server.respond_json("GET", "/agents", 200, json!({"agents": [], "total": 0}));
        let client = server.client();

        let response = client
            .auth()
            .login(&LoginRequest::new("ops@example.com", "hunter2"))
            .await
            .unwrap();
        assert_eq!(response.access_token, "tok123");
        assert_eq!(response.user.organization_id, "org1");

        let login = server.last_request();
        assert_eq!(login.path, "/api/v1/auth/login");
        assert_eq!(
            login.json(),
            json!({"email": "ops@example.com", "password": "hunter2"})
        );

        client.agents().list(None).await.unwrap();
        assert_eq!(
            server.last_request().header("authorization"),
            Some("Bearer tok123")
        );
    }

    #[tokio::test]
    async fn register_posts_organization() {
        let server = MockServer::start().await;
        server.respond_json("POST", "/auth/register", 200, auth_body("fresh"));
        let client = server.client();

        let details = RegisterRequest {
            email: "new@example.com".to_string(),
            password: "pw".to_string(),
            organization_name: "Acme".to_string(),
        };
        client.auth().register(&details).await.unwrap();

        assert_eq!(server.last_request().json()["organization_name"], "Acme");
        assert_eq!(client.session().get(), Some("fresh".to_string()));
    }

    #[tokio::test]
    async fn failed_login_leaves_session_untouched() {
        let server = MockServer::start().await;
        server.respond("POST", "/auth/login", 400, r#"{"detail":"Invalid credentials"}"#);
        let client = server.client();

        let err = client
            .auth()
            .login(&LoginRequest::new("ops@example.com", "wrong"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(!client.session().is_active());
    }

    #[tokio::test]
    async fn login_rejected_with_401_still_expires_session() {
        let server = MockServer::start().await;
        server.respond("POST", "/auth/login", 401, r#"{"detail":"Invalid credentials"}"#);
        let session = SessionStore::ephemeral();
        session.set(Some("previous".to_string())).unwrap();
        let mut events = session.subscribe();
        let client = server.client_with(session);

        let err = client
            .auth()
            .login(&LoginRequest::new("ops@example.com", "wrong"))
            .await
            .unwrap_err();

        assert!(err.is_unauthorized());
        assert!(!client.session().is_active());
        assert_eq!(
            events.try_recv().unwrap(),
            SessionEvent::Expired {
                login_path: "/login".to_string()
            }
        );
    }

    #[tokio::test]
    async fn empty_access_token_does_not_start_a_session() {
        let server = MockServer::start().await;
        server.respond_json("POST", "/auth/login", 200, auth_body(""));
        server.respond_json("GET", "/agents", 200, json!({"agents": [], "total": 0}));
        let client = server.client();

        client
            .auth()
            .login(&LoginRequest::new("ops@example.com", "hunter2"))
            .await
            .unwrap();
        assert!(!client.session().is_active());

        client.agents().list(None).await.unwrap();
        assert_eq!(server.last_request().header("authorization"), None);
    }

    #[tokio::test]
    async fn logout_is_local_only() {
        let server = MockServer::start().await;
        let session = SessionStore::ephemeral();
        session.set(Some("tok".to_string())).unwrap();
        let client = server.client_with(session);

        client.auth().logout().unwrap();

        assert!(!client.session().is_active());
        assert!(server.requests().is_empty());
    }

    #[test]
    fn token_type_defaults_to_bearer() {
        let response: AuthResponse = serde_json::from_value(json!({
            "access_token": "t",
            "user": {"id": "u", "email": "e", "organization_id": "o"}
        }))
        .unwrap();
        assert_eq!(response.token_type, "bearer");
    }

    #[test]
    fn debug_redacts_password() {
        let rendered = format!("{:?}", LoginRequest::new("a@b.c", "s3cret"));
        assert!(!rendered.contains("s3cret"));
    }
}
