// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! by the client. Configuration is loaded from the environment at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `AGENTWALLET_API_URL` | Origin of the REST service | `http://localhost:8000` |
//! | `AGENTWALLET_SESSION_FILE` | File holding the persisted bearer token | `~/.agentwallet/session` |
//! | `AGENTWALLET_LOGIN_PATH` | Login surface announced when a session expires | `/login` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |

use std::env;
use std::path::PathBuf;

use url::Url;

/// Environment variable holding the service origin (scheme, host, port).
pub const API_URL_ENV: &str = "AGENTWALLET_API_URL";

/// Environment variable overriding the session token file.
pub const SESSION_FILE_ENV: &str = "AGENTWALLET_SESSION_FILE";

/// Environment variable overriding the login surface path.
pub const LOGIN_PATH_ENV: &str = "AGENTWALLET_LOGIN_PATH";

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Fixed prefix every endpoint path is resolved against.
pub const API_BASE_PATH: &str = "/api/v1";

const SESSION_DIR: &str = ".agentwallet";
const SESSION_FILE: &str = "session";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service origin without the API base path (e.g. `https://app.agentwallet.fun`).
    pub api_url: String,
    /// Where the bearer token is persisted between runs.
    pub session_file: PathBuf,
    /// Path carried by the session-expired event.
    pub login_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_file: default_session_file(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
        }
    }
}

impl ClientConfig {
    /// Load from the environment, falling back to defaults, then validate.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            api_url: env::var(API_URL_ENV).unwrap_or(defaults.api_url),
            session_file: env::var(SESSION_FILE_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.session_file),
            login_path: env::var(LOGIN_PATH_ENV).unwrap_or(defaults.login_path),
        };
        config.validate()?;
        Ok(config)
    }

    /// Point the client at a different origin.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = path.into();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api_url",
                reason: "must not be empty".to_string(),
            });
        }
        let parsed = Url::parse(self.api_url.trim()).map_err(|e| ConfigError::InvalidValue {
            field: "api_url",
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "api_url",
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        if self.session_file.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "session_file",
                reason: "must not be empty".to_string(),
            });
        }
        if !self.login_path.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "login_path",
                reason: "must start with '/'".to_string(),
            });
        }
        Ok(())
    }

    /// Origin joined with [`API_BASE_PATH`], without a trailing slash.
    pub fn api_base_url(&self) -> String {
        format!("{}{}", self.api_url.trim().trim_end_matches('/'), API_BASE_PATH)
    }
}

fn default_session_file() -> PathBuf {
    let home = env::var_os("HOME").map(PathBuf::from).unwrap_or_default();
    home.join(SESSION_DIR).join(SESSION_FILE)
}
