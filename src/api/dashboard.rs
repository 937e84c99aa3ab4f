// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Dashboard summary: headline counts and recent activity.

use serde::{Deserialize, Serialize};

use super::{DailySpend, Transaction};
use crate::client::RequestEngine;
use crate::error::ClientResult;

/// Headline counts plus recent activity, fetched in one call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardOverview {
    pub total_agents: u64,
    pub total_wallets: u64,
    pub total_transactions: u64,
    pub total_spend_usd: f64,
    #[serde(default)]
    pub recent_transactions: Vec<Transaction>,
    #[serde(default)]
    pub daily_spend: Vec<DailySpend>,
}

pub struct DashboardApi<'a> {
    engine: &'a RequestEngine,
}

impl<'a> DashboardApi<'a> {
    pub fn new(engine: &'a RequestEngine) -> Self {
        Self { engine }
    }

    pub async fn overview(&self) -> ClientResult<DashboardOverview> {
        self.engine.get("/dashboard/overview").await
    }
}
