// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Subscription tier, usage counters and upgrades.
//!
//! A limit of `-1` means the resource is unlimited on the current tier; a
//! `price_monthly` of `-1` means custom pricing. Upgrading only produces a
//! checkout URL; payment happens elsewhere.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::RequestEngine;
use crate::error::ClientResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierName {
    Free,
    Starter,
    Pro,
    Enterprise,
}

impl TierName {
    pub fn as_str(&self) -> &'static str {
        match self {
            TierName::Free => "free",
            TierName::Starter => "starter",
            TierName::Pro => "pro",
            TierName::Enterprise => "enterprise",
        }
    }
}

/// A server-computed `used`/`limit` pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UsageCounter {
    pub used: u64,
    pub limit: i64,
}

impl UsageCounter {
    pub fn is_unlimited(&self) -> bool {
        self.limit < 0
    }

    /// Share of the limit consumed, as a percentage. `None` when unlimited
    /// or the limit is zero.
    pub fn utilization(&self) -> Option<f64> {
        if self.limit > 0 {
            Some(self.used as f64 / self.limit as f64 * 100.0)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Usage {
    pub agents: UsageCounter,
    pub wallets: UsageCounter,
    pub transactions_monthly: UsageCounter,
    pub api_calls_monthly: UsageCounter,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillingInfo {
    pub tier: TierName,
    pub usage: Usage,
    pub current_period_end: DateTime<Utc>,
    pub amount_due: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TierLimits {
    pub agents: i64,
    pub wallets: i64,
    pub transactions_monthly: i64,
    pub api_calls_monthly: i64,
}

/// A purchasable tier. `name` matches [`BillingInfo::tier`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillingTier {
    pub name: String,
    pub price_monthly: f64,
    pub limits: TierLimits,
    #[serde(default)]
    pub features: Vec<String>,
}

impl BillingTier {
    pub fn has_custom_pricing(&self) -> bool {
        self.price_monthly < 0.0
    }
}

/// Where to send the operator to complete an upgrade.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutSession {
    pub checkout_url: String,
}

#[derive(Serialize)]
struct UpgradeRequest<'a> {
    tier: &'a str,
}

#[derive(Deserialize)]
struct TierList {
    tiers: Vec<BillingTier>,
}

pub struct BillingApi<'a> {
    engine: &'a RequestEngine,
}

impl<'a> BillingApi<'a> {
    pub fn new(engine: &'a RequestEngine) -> Self {
        Self { engine }
    }

    pub async fn current(&self) -> ClientResult<BillingInfo> {
        self.engine.get("/billing").await
    }

    pub async fn tiers(&self) -> ClientResult<Vec<BillingTier>> {
        let list: TierList = self.engine.get("/billing/tiers").await?;
        Ok(list.tiers)
    }

    /// Request an upgrade to `tier` and return the checkout target.
    pub async fn upgrade(&self, tier: &str) -> ClientResult<CheckoutSession> {
        self.engine
            .post("/billing/upgrade", &UpgradeRequest { tier })
            .await
    }
}
