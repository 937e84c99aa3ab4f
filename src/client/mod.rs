// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Client
//!
//! [`ApiClient`] bundles the [`RequestEngine`] with accessors for every
//! resource client. Resource clients are cheap borrowed facades: they only
//! build paths, query strings and payloads, then hand off to the engine.
//!
//! ```rust,ignore
//! let client = ApiClient::from_config(&ClientConfig::from_env()?)?;
//! client.auth().login(&LoginRequest::new("ops@example.com", "hunter2")).await?;
//! let page = client.agents().list(Some(&AgentFilters::with_status(AgentStatus::Active))).await?;
//! ```

pub mod engine;
pub mod query;

pub use engine::{RequestEngine, RequestOptions};
pub use query::{resource_path, Pagination, QueryFilters, QueryString};

use crate::api::{
    AgentsApi, AnalyticsApi, AuditLogApi, AuthApi, BillingApi, DashboardApi, PoliciesApi,
    TransactionsApi, WalletsApi,
};
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::session::{FileTokenPersistence, SessionStore};

#[derive(Debug, Clone)]
pub struct ApiClient {
    engine: RequestEngine,
}

impl ApiClient {
    /// Build a client around an existing session.
    pub fn new(config: &ClientConfig, session: SessionStore) -> ClientResult<Self> {
        Ok(Self {
            engine: RequestEngine::new(config, session)?,
        })
    }

    /// Build a client whose session is restored from `config.session_file`.
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let session = SessionStore::restore(FileTokenPersistence::new(&config.session_file));
        Self::new(config, session)
    }

    pub fn engine(&self) -> &RequestEngine {
        &self.engine
    }

    pub fn session(&self) -> &SessionStore {
        self.engine.session()
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(&self.engine)
    }

    pub fn agents(&self) -> AgentsApi<'_> {
        AgentsApi::new(&self.engine)
    }

    pub fn wallets(&self) -> WalletsApi<'_> {
        WalletsApi::new(&self.engine)
    }

    pub fn transactions(&self) -> TransactionsApi<'_> {
        TransactionsApi::new(&self.engine)
    }

    pub fn analytics(&self) -> AnalyticsApi<'_> {
        AnalyticsApi::new(&self.engine)
    }

    pub fn policies(&self) -> PoliciesApi<'_> {
        PoliciesApi::new(&self.engine)
    }

    pub fn audit_log(&self) -> AuditLogApi<'_> {
        AuditLogApi::new(&self.engine)
    }

    pub fn billing(&self) -> BillingApi<'_> {
        BillingApi::new(&self.engine)
    }

    pub fn dashboard(&self) -> DashboardApi<'_> {
        DashboardApi::new(&self.engine)
    }
}
