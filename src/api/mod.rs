// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Resource Clients
//!
//! One module per resource domain of the AgentWallet service. Each module
//! holds the wire types for its domain and a borrowed facade over
//! [`RequestEngine`](crate::client::RequestEngine):
//!
//! | Client | Endpoints |
//! |--------|-----------|
//! | [`AuthApi`] | `POST /auth/login`, `POST /auth/register` (logout is local) |
//! | [`AgentsApi`] | `GET/POST /agents`, `GET/PATCH/DELETE /agents/{id}` |
//! | [`WalletsApi`] | `GET/POST /wallets`, `GET /wallets/{id}` |
//! | [`TransactionsApi`] | `GET /transactions`, `GET /transactions/{id}` |
//! | [`AnalyticsApi`] | `GET /analytics/daily-spend`, `/agent-breakdown`, `/summary` |
//! | [`PoliciesApi`] | `GET/POST /policies`, `GET/PATCH/DELETE /policies/{id}` |
//! | [`AuditLogApi`] | `GET /audit-log`, `GET /audit-log/{id}` |
//! | [`BillingApi`] | `GET /billing`, `GET /billing/tiers`, `POST /billing/upgrade` |
//! | [`DashboardApi`] | `GET /dashboard/overview` |

pub mod agents;
pub mod analytics;
pub mod audit_log;
pub mod auth;
pub mod billing;
pub mod dashboard;
pub mod policies;
pub mod transactions;
pub mod wallets;

pub use agents::{
    Agent, AgentFilters, AgentStatus, AgentsApi, CreateAgentRequest, CreateAgentResponse,
    UpdateAgentRequest,
};
pub use analytics::{AgentSpend, AnalyticsApi, AnalyticsSummary, DailySpend, DEFAULT_WINDOW_DAYS};
pub use audit_log::{ActorType, AuditEvent, AuditLogApi, AuditLogFilters};
pub use auth::{AuthApi, AuthResponse, AuthUser, LoginRequest, RegisterRequest};
pub use billing::{
    BillingApi, BillingInfo, BillingTier, CheckoutSession, TierLimits, TierName, Usage,
    UsageCounter,
};
pub use dashboard::{DashboardApi, DashboardOverview};
pub use policies::{
    CreatePolicyRequest, PoliciesApi, Policy, PolicyFilters, PolicyRule, PolicyRuleType,
    UpdatePolicyRequest,
};
pub use transactions::{
    Transaction, TransactionFilters, TransactionStatus, TransactionType, TransactionsApi,
};
pub use wallets::{CreateWalletRequest, Wallet, WalletFilters, WalletStatus, WalletsApi};

/// `{ "data": [...] }` wrapper used by analytics series.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: Vec<T>,
}
