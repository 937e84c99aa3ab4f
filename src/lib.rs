// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! AgentWallet Console - data-access layer for the AgentWallet operator
//! dashboard.
//!
//! All traffic to the AgentWallet REST service goes through this crate. It
//! owns the bearer-token session, normalizes every failure into a
//! [`ClientError`], and exposes typed operations for each resource domain.
//!
//! ## Modules
//!
//! - `session` - Token lifecycle, persistence and expiry events
//! - `client` - Request pipeline and the [`ApiClient`] facade
//! - `api` - Resource clients (agents, wallets, transactions, ...)
//! - `config` - Environment-driven configuration
//! - `telemetry` - Tracing subscriber setup

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod telemetry;

#[cfg(test)]
mod test_support;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use models::Page;
pub use session::{SessionEvent, SessionStore};
