// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Session Module
//!
//! Owns the single bearer credential the client presents to the service.
//!
//! - [`SessionStore`] - shared handle over the current token, last writer wins
//! - [`TokenPersistence`] - durable copy of the token across restarts
//! - [`SessionEvent`] - notifications for the presentation layer (sign-in,
//!   sign-out, expiry with the login surface to navigate to)
//!
//! There is exactly one live credential per store. Clones of a store share it.

pub mod persistence;
pub mod store;

pub use persistence::{FileTokenPersistence, MemoryTokenPersistence, TokenPersistence};
pub use store::{SessionEvent, SessionStore};

use std::io;
use std::path::PathBuf;

/// Error type for token persistence.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Session file path is invalid: {}", .0.display())]
    InvalidPath(PathBuf),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
