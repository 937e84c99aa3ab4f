// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Read-only access to agent transactions.
//!
//! Status transitions happen on the service; this client only observes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{resource_path, Pagination, QueryFilters, QueryString, RequestEngine};
use crate::error::ClientResult;
use crate::models::{DecimalString, Page, WalletAddress};

// =============================================================================
// Data Types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Transfer,
    Swap,
    Stake,
    ContractCall,
}

/// Settlement state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    Failed,
    Cancelled,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Confirmed => "confirmed",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Cancelled => "cancelled",
        }
    }

    /// True once the service will no longer change the status.
    pub fn is_final(&self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub wallet_id: String,
    pub agent_id: String,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub status: TransactionStatus,
    pub chain: String,
    pub from_address: WalletAddress,
    pub to_address: WalletAddress,
    pub amount: DecimalString,
    pub token: String,
    /// On-chain hash, once broadcast.
    pub tx_hash: Option<String>,
    pub gas_used: Option<DecimalString>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub confirmed_at: Option<DateTime<Utc>>,
    /// Approver signatures collected so far.
    #[serde(default)]
    pub signatures: Vec<String>,
}

/// Filters for `GET /transactions`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilters {
    pub status: Option<TransactionStatus>,
    pub agent_id: Option<String>,
    pub wallet_id: Option<String>,
    pub page: Pagination,
}

impl QueryFilters for TransactionFilters {
    fn to_query(&self) -> QueryString {
        let query = QueryString::new()
            .text("status", self.status.map(|s| s.as_str()))
            .text("agent_id", self.agent_id.as_deref())
            .text("wallet_id", self.wallet_id.as_deref());
        self.page.append_to(query)
    }
}

#[derive(Deserialize)]
struct TransactionList {
    transactions: Vec<Transaction>,
    total: u64,
}

impl From<TransactionList> for Page<Transaction> {
    fn from(list: TransactionList) -> Self {
        Page::new(list.transactions, list.total)
    }
}

// =============================================================================
// Client
// =============================================================================

pub struct TransactionsApi<'a> {
    engine: &'a RequestEngine,
}

impl<'a> TransactionsApi<'a> {
    pub fn new(engine: &'a RequestEngine) -> Self {
        Self { engine }
    }

    pub async fn list(
        &self,
        filters: Option<&TransactionFilters>,
    ) -> ClientResult<Page<Transaction>> {
        let path = filters.to_query().apply("/transactions");
        let list: TransactionList = self.engine.get(&path).await?;
        Ok(list.into())
    }

    pub async fn get(&self, id: &str) -> ClientResult<Transaction> {
        self.engine.get(&resource_path("/transactions", id)).await
    }
}
