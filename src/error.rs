// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Error taxonomy for the data-access layer.
//!
//! Every failed call surfaces as exactly one [`ClientError`]:
//!
//! - [`ClientError::Unauthorized`] - the service answered 401. By the time
//!   the caller sees it, the session has been cleared and a
//!   [`SessionEvent::Expired`](crate::session::SessionEvent) has been emitted.
//! - [`ClientError::Http`] - any other non-success status, carrying the best
//!   human-readable message the response body offered.
//! - [`ClientError::Transport`] - the call never completed (DNS, refused
//!   connection, transport timeout). Passed through unchanged.
//!
//! The remaining variants cover local failures: decoding a success body,
//! persisting the token, encoding headers and loading configuration.

use reqwest::StatusCode;

use crate::config::ConfigError;
use crate::session::SessionError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Session expired or was rejected by the service (HTTP 401).
    #[error("Unauthorized")]
    Unauthorized,

    /// Non-success status other than 401.
    #[error("{message}")]
    Http { status: StatusCode, message: String },

    /// The request never reached a response.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// A success response whose body did not match the expected shape.
    #[error("Failed to decode response (HTTP {status}): {source}")]
    Decode {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },

    /// Request payload could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    Session(#[from] SessionError),

    /// A header name or value could not be encoded.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ClientError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    /// HTTP status associated with this error, if the service answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            ClientError::Http { status, .. } | ClientError::Decode { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
