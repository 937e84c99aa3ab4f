// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Shared Data Models
//!
//! Wire types shared by several resource clients. Resource-specific
//! records live next to their client in [`crate::api`].
//!
//! All records are server-owned: this crate only decodes what the service
//! returns and never mutates them locally.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Free-form JSON object (agent metadata, rule params, audit details).
pub type Metadata = serde_json::Map<String, serde_json::Value>;

// =============================================================================
// Listing Envelope
// =============================================================================

/// One window of a listing.
///
/// `total` is the server's count of every matching record, independent of
/// the `limit`/`offset` window that produced `items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True when the service holds more records than this window carries.
    pub fn has_more(&self) -> bool {
        (self.items.len() as u64) < self.total
    }
}

// =============================================================================
// Wallet Address Type
// =============================================================================

/// On-chain address as reported by the service.
///
/// The format depends on the chain, so nothing is validated here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct WalletAddress(pub String);

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for WalletAddress {
    fn from(value: String) -> Self {
        WalletAddress(value)
    }
}

impl From<&str> for WalletAddress {
    fn from(value: &str) -> Self {
        WalletAddress(value.to_string())
    }
}

impl From<WalletAddress> for String {
    fn from(value: WalletAddress) -> Self {
        value.0
    }
}

// =============================================================================
// Decimal Amounts
// =============================================================================

/// Decimal quantity (balance, amount, gas) kept exactly as the service sent it.
///
/// Never parsed into a float: the string is shown to operators verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct DecimalString(pub String);

impl DecimalString {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DecimalString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DecimalString {
    fn from(value: &str) -> Self {
        DecimalString(value.to_string())
    }
}

impl From<String> for DecimalString {
    fn from(value: String) -> Self {
        DecimalString(value)
    }
}
