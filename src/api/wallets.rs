// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet listing, retrieval and creation.
//!
//! Balances are decimal strings owned by the service and are never parsed
//! here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{resource_path, Pagination, QueryFilters, QueryString, RequestEngine};
use crate::error::ClientResult;
use crate::models::{DecimalString, Page, WalletAddress};

/// Wallet status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletStatus {
    /// Wallet is active and can be used
    Active,
    /// Outgoing transfers blocked
    Frozen,
    /// Retired, kept for history
    Archived,
}

/// A custodial wallet, optionally bound to an agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Wallet {
    pub id: String,
    pub agent_id: Option<String>,
    pub chain: String,
    pub address: WalletAddress,
    pub balance: DecimalString,
    pub status: WalletStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub label: Option<String>,
}

/// Payload for `POST /wallets`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateWalletRequest {
    pub chain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Filters for `GET /wallets`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletFilters {
    pub chain: Option<String>,
    pub agent_id: Option<String>,
    pub page: Pagination,
}

impl QueryFilters for WalletFilters {
    fn to_query(&self) -> QueryString {
        let query = QueryString::new()
            .text("chain", self.chain.as_deref())
            .text("agent_id", self.agent_id.as_deref());
        self.page.append_to(query)
    }
}

#[derive(Deserialize)]
struct WalletList {
    wallets: Vec<Wallet>,
    total: u64,
}

impl From<WalletList> for Page<Wallet> {
    fn from(list: WalletList) -> Self {
        Page::new(list.wallets, list.total)
    }
}

pub struct WalletsApi<'a> {
    engine: &'a RequestEngine,
}

impl<'a> WalletsApi<'a> {
    pub fn new(engine: &'a RequestEngine) -> Self {
        Self { engine }
    }

    pub async fn list(&self, filters: Option<&WalletFilters>) -> ClientResult<Page<Wallet>> {
        let path = filters.to_query().apply("/wallets");
        let list: WalletList = self.engine.get(&path).await?;
        Ok(list.into())
    }

    pub async fn get(&self, id: &str) -> ClientResult<Wallet> {
        self.engine.get(&resource_path("/wallets", id)).await
    }

    pub async fn create(&self, request: &CreateWalletRequest) -> ClientResult<Wallet> {
        self.engine.post("/wallets", request).await
    }
}
