// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Agent management: list, inspect, create, update and delete agents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{resource_path, Pagination, QueryFilters, QueryString, RequestEngine};
use crate::error::ClientResult;
use crate::models::{Metadata, Page};

// =============================================================================
// Data Types
// =============================================================================

/// Agent lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    /// Agent may sign and submit transactions
    Active,
    /// Temporarily suspended by an operator
    Paused,
    /// API key revoked; permanent
    Revoked,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Active => "active",
            AgentStatus::Paused => "paused",
            AgentStatus::Revoked => "revoked",
        }
    }
}

/// An autonomous agent registered with the platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Agent {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: AgentStatus,
    /// First characters of the agent's API key, for recognition only.
    pub api_key_prefix: String,
    pub policy_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub metadata: Metadata,
}

/// Payload for `POST /agents`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAgentRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl CreateAgentRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Result of agent creation.
///
/// `api_key` is the plaintext key. The service shows it exactly once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateAgentResponse {
    pub agent: Agent,
    pub api_key: String,
}

/// Partial update for `PATCH /agents/{id}`. Only present fields are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAgentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AgentStatus>,
}

/// Filters for `GET /agents`. Each field is sent only when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentFilters {
    pub status: Option<AgentStatus>,
    pub page: Pagination,
}

impl AgentFilters {
    pub fn with_status(status: AgentStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl QueryFilters for AgentFilters {
    fn to_query(&self) -> QueryString {
        let query = QueryString::new().text("status", self.status.map(|s| s.as_str()));
        self.page.append_to(query)
    }
}

#[derive(Deserialize)]
struct AgentList {
    agents: Vec<Agent>,
    total: u64,
}

impl From<AgentList> for Page<Agent> {
    fn from(list: AgentList) -> Self {
        Page::new(list.agents, list.total)
    }
}

// =============================================================================
// Client
// =============================================================================

pub struct AgentsApi<'a> {
    engine: &'a RequestEngine,
}

impl<'a> AgentsApi<'a> {
    pub fn new(engine: &'a RequestEngine) -> Self {
        Self { engine }
    }

    pub async fn list(&self, filters: Option<&AgentFilters>) -> ClientResult<Page<Agent>> {
        let path = filters.to_query().apply("/agents");
        let list: AgentList = self.engine.get(&path).await?;
        Ok(list.into())
    }

    pub async fn get(&self, id: &str) -> ClientResult<Agent> {
        self.engine.get(&resource_path("/agents", id)).await
    }

    pub async fn create(&self, request: &CreateAgentRequest) -> ClientResult<CreateAgentResponse> {
        self.engine.post("/agents", request).await
    }

    pub async fn update(&self, id: &str, changes: &UpdateAgentRequest) -> ClientResult<Agent> {
        self.engine.patch(&resource_path("/agents", id), changes).await
    }

    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        self.engine.delete(&resource_path("/agents", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{SessionEvent, SessionStore};
    use crate::test_support::MockServer;
    use serde_json::json;

    fn agent_json(id: &str, status: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": "bot1",
            "description": "",
            "status": status,
            "api_key_prefix": "sk_live_ab",
            "policy_id": null,
            "created_at": "2026-01-15T10:00:00Z",
            "updated_at": "2026-01-15T10:00:00Z",
            "metadata": {}
        })
    }

    #[tokio::test]
    async fn list_with_status_filter() {
        let server = MockServer::start().await;
        server.respond_json(
            "GET",
            "/agents",
            200,
            json!({"agents": [agent_json("a1", "active")], "total": 7}),
        );
        let client = server.client();

        let page = client
            .agents()
            .list(Some(&AgentFilters::with_status(AgentStatus::Active)))
            .await
            .unwrap();

        assert_eq!(server.last_request().path, "/api/v1/agents?status=active");
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].status, AgentStatus::Active);
        assert_eq!(page.total, 7);
    }

    #[tokio::test]
    async fn list_without_filters_has_no_query() {
        let server = MockServer::start().await;
        server.respond_json("GET", "/agents", 200, json!({"agents": [], "total": 0}));
        let client = server.client();

        client.agents().list(Some(&AgentFilters::default())).await.unwrap();
        client.agents().list(None).await.unwrap();

        for request in server.requests() {
            assert_eq!(request.path, "/api/v1/agents");
        }
    }

    #[tokio::test]
    async fn list_orders_filters_by_declaration() {
        let server = MockServer::start().await;
        server.respond_json("GET", "/agents", 200, json!({"agents": [], "total": 0}));
        let client = server.client();

        let filters = AgentFilters {
            page: Pagination {
                offset: Some(20),
                limit: Some(10),
            },
            status: Some(AgentStatus::Paused),
        };
        client.agents().list(Some(&filters)).await.unwrap();

        assert_eq!(
            server.last_request().path,
            "/api/v1/agents?status=paused&limit=10&offset=20"
        );
    }

    #[tokio::test]
    async fn create_returns_agent_and_key() {
        let server = MockServer::start().await;
        server.respond_json(
            "POST",
            "/agents",
            201,
            json!({"agent": agent_json("a9", "active"), "api_key": "sk_live_abcdef"}),
        );
        let client = server.client();

        let created = client
            .agents()
            .create(&CreateAgentRequest::new("bot1"))
            .await
            .unwrap();

        assert_eq!(created.api_key, "sk_live_abcdef");
        assert_eq!(created.agent.id, "a9");
        assert_eq!(created.agent.status, AgentStatus::Active);
        assert_eq!(server.last_request().json(), json!({"name": "bot1"}));
    }

    #[tokio::test]
    async fn update_sends_only_changed_fields() {
        let server = MockServer::start().await;
        server.respond_json("PATCH", "/agents/a1", 200, agent_json("a1", "paused"));
        let client = server.client();

        let changes = UpdateAgentRequest {
            status: Some(AgentStatus::Paused),
            ..UpdateAgentRequest::default()
        };
        let agent = client.agents().update("a1", &changes).await.unwrap();

        assert_eq!(agent.status, AgentStatus::Paused);
        let request = server.last_request();
        assert_eq!(request.method, "PATCH");
        assert_eq!(request.json(), json!({"status": "paused"}));
    }

    #[tokio::test]
    async fn get_and_delete() {
        let server = MockServer::start().await;
        server.respond_json("GET", "/agents/a1", 200, agent_json("a1", "revoked"));
        server.respond("DELETE", "/agents/a1", 204, "");
        let client = server.client();

        let agent = client.agents().get("a1").await.unwrap();
        assert_eq!(agent.status, AgentStatus::Revoked);
        client.agents().delete("a1").await.unwrap();

        let methods: Vec<_> = server.requests().into_iter().map(|r| r.method).collect();
        assert_eq!(methods, ["GET", "DELETE"]);
    }

    #[tokio::test]
    async fn ids_are_encoded_as_one_segment() {
        let server = MockServer::start().await;
        server.respond_json("GET", "/agents/a%2F..%3Fx", 200, agent_json("a/..?x", "active"));
        let client = server.client();

        let agent = client.agents().get("a/..?x").await.unwrap();

        assert_eq!(agent.id, "a/..?x");
        assert_eq!(server.last_request().path, "/api/v1/agents/a%2F..%3Fx");
    }

    #[tokio::test]
    async fn create_with_expired_session_signs_out() {
        let server = MockServer::start().await;
        server.respond("POST", "/agents", 401, r#"{"detail":"Token expired"}"#);
        let session = SessionStore::ephemeral();
        session.set(Some("stale".to_string())).unwrap();
        let mut events = session.subscribe();
        let client = server.client_with(session);

        let err = client
            .agents()
            .create(&CreateAgentRequest::new("bot1"))
            .await
            .unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(client.session().get(), None);
        assert!(matches!(
            events.try_recv().unwrap(),
            SessionEvent::Expired { .. }
        ));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let result = serde_json::from_value::<Agent>(agent_json("a1", "sleeping"));
        assert!(result.is_err());
    }
}
