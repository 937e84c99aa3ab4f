// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Spend analytics over a trailing day window.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::DataEnvelope;
use crate::client::{QueryString, RequestEngine};
use crate::error::ClientResult;

/// Window used when the caller does not pick one.
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Spend for one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailySpend {
    pub date: NaiveDate,
    pub total_usd: f64,
    pub tx_count: u64,
}

/// Spend attributed to a single agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentSpend {
    pub agent_id: String,
    pub agent_name: String,
    pub total_usd: f64,
    pub tx_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsSummary {
    pub total_spend_usd: f64,
    pub total_transactions: u64,
    pub active_agents: u64,
    pub active_wallets: u64,
    pub avg_tx_value: f64,
    pub period_days: u32,
}

pub struct AnalyticsApi<'a> {
    engine: &'a RequestEngine,
}

impl<'a> AnalyticsApi<'a> {
    pub fn new(engine: &'a RequestEngine) -> Self {
        Self { engine }
    }

    /// Per-day spend for the last `days` days (default 30).
    pub async fn daily_spend(&self, days: Option<u32>) -> ClientResult<Vec<DailySpend>> {
        let path = window_query(days).apply("/analytics/daily-spend");
        let envelope: DataEnvelope<DailySpend> = self.engine.get(&path).await?;
        Ok(envelope.data)
    }

    pub async fn agent_breakdown(&self) -> ClientResult<Vec<AgentSpend>> {
        let envelope: DataEnvelope<AgentSpend> =
            self.engine.get("/analytics/agent-breakdown").await?;
        Ok(envelope.data)
    }

    /// Aggregate figures for the last `days` days (default 30).
    pub async fn summary(&self, days: Option<u32>) -> ClientResult<AnalyticsSummary> {
        let path = window_query(days).apply("/analytics/summary");
        self.engine.get(&path).await
    }
}

fn window_query(days: Option<u32>) -> QueryString {
    QueryString::new().number("days", Some(days.unwrap_or(DEFAULT_WINDOW_DAYS)))
}
