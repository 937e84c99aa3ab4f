// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Spending policies and their ordered rule lists.
//!
//! Rule parameters are opaque here: their shape depends on the rule type and
//! the service validates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{resource_path, Pagination, QueryFilters, QueryString, RequestEngine};
use crate::error::ClientResult;
use crate::models::{Metadata, Page};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyRuleType {
    SpendingLimit,
    Whitelist,
    TimeWindow,
    ApprovalRequired,
    ChainRestriction,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PolicyRule {
    #[serde(rename = "type")]
    pub rule_type: PolicyRuleType,
    #[serde(default)]
    pub params: Metadata,
}

impl PolicyRule {
    pub fn new(rule_type: PolicyRuleType, params: Metadata) -> Self {
        Self { rule_type, params }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Policy {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Evaluated in order by the service.
    pub rules: Vec<PolicyRule>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePolicyRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub rules: Vec<PolicyRule>,
}

/// Partial update for `PATCH /policies/{id}`. A present `rules` replaces the
/// whole list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePolicyRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<PolicyRule>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyFilters {
    pub page: Pagination,
}

impl QueryFilters for PolicyFilters {
    fn to_query(&self) -> QueryString {
        self.page.append_to(QueryString::new())
    }
}

#[derive(Deserialize)]
struct PolicyList {
    policies: Vec<Policy>,
    total: u64,
}

impl From<PolicyList> for Page<Policy> {
    fn from(list: PolicyList) -> Self {
        Page::new(list.policies, list.total)
    }
}

pub struct PoliciesApi<'a> {
    engine: &'a RequestEngine,
}

impl<'a> PoliciesApi<'a> {
    pub fn new(engine: &'a RequestEngine) -> Self {
        Self { engine }
    }

    pub async fn list(&self, filters: Option<&PolicyFilters>) -> ClientResult<Page<Policy>> {
        let path = filters.to_query().apply("/policies");
        let list: PolicyList = self.engine.get(&path).await?;
        Ok(list.into())
    }

    pub async fn get(&self, id: &str) -> ClientResult<Policy> {
        self.engine.get(&resource_path("/policies", id)).await
    }

    pub async fn create(&self, request: &CreatePolicyRequest) -> ClientResult<Policy> {
        self.engine.post("/policies", request).await
    }

    pub async fn update(&self, id: &str, changes: &UpdatePolicyRequest) -> ClientResult<Policy> {
        self.engine.patch(&resource_path("/policies", id), changes).await
    }

    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        self.engine.delete(&resource_path("/policies", id)).await
    }
}
