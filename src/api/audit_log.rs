// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Append-only audit trail. Read-only from this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{resource_path, Pagination, QueryFilters, QueryString, RequestEngine};
use crate::error::ClientResult;
use crate::models::{Metadata, Page};

/// Who performed an audited action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorType {
    User,
    Agent,
    System,
}

impl ActorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorType::User => "user",
            ActorType::Agent => "agent",
            ActorType::System => "system",
        }
    }
}

/// A single audit record, pointing at the affected resource by
/// `(resource_type, resource_id)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditEvent {
    pub id: String,
    pub actor_type: ActorType,
    pub actor_id: String,
    /// Dotted action name, e.g. `agent.create`.
    pub action: String,
    pub resource_type: String,
    pub resource_id: String,
    #[serde(default)]
    pub details: Metadata,
    #[serde(default)]
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditLogFilters {
    pub action: Option<String>,
    pub actor_type: Option<ActorType>,
    pub resource_type: Option<String>,
    pub page: Pagination,
}

impl QueryFilters for AuditLogFilters {
    fn to_query(&self) -> QueryString {
        let query = QueryString::new()
            .text("action", self.action.as_deref())
            .text("actor_type", self.actor_type.map(|a| a.as_str()))
            .text("resource_type", self.resource_type.as_deref());
        self.page.append_to(query)
    }
}

#[derive(Deserialize)]
struct EventList {
    events: Vec<AuditEvent>,
    total: u64,
}

impl From<EventList> for Page<AuditEvent> {
    fn from(list: EventList) -> Self {
        Page::new(list.events, list.total)
    }
}

pub struct AuditLogApi<'a> {
    engine: &'a RequestEngine,
}

impl<'a> AuditLogApi<'a> {
    pub fn new(engine: &'a RequestEngine) -> Self {
        Self { engine }
    }

    pub async fn list(&self, filters: Option<&AuditLogFilters>) -> ClientResult<Page<AuditEvent>> {
        let path = filters.to_query().apply("/audit-log");
        let list: EventList = self.engine.get(&path).await?;
        Ok(list.into())
    }

    pub async fn get(&self, id: &str) -> ClientResult<AuditEvent> {
        self.engine.get(&resource_path("/audit-log", id)).await
    }
}
