// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Durable storage for the bearer token.
//!
//! The token is an opaque string. It is written as-is to a single file
//! (the one durable key of the client) and never decoded.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::{SessionError, SessionResult};

/// Owner read/write only.
#[cfg(unix)]
const TOKEN_FILE_MODE: u32 = 0o600;

/// Backend that keeps a copy of the token across process restarts.
pub trait TokenPersistence: Send + Sync + fmt::Debug {
    /// Read the persisted token, `None` when nothing is stored.
    fn load(&self) -> SessionResult<Option<String>>;

    /// Replace the persisted token.
    fn save(&self, token: &str) -> SessionResult<()>;

    /// Remove the persisted token. Removing an absent token is a no-op.
    fn clear(&self) -> SessionResult<()>;
}

// =============================================================================
// File Backend
// =============================================================================

/// Keeps the token in one plain file.
#[derive(Debug, Clone)]
pub struct FileTokenPersistence {
    path: PathBuf,
}

impl FileTokenPersistence {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenPersistence for FileTokenPersistence {
    fn load(&self) -> SessionResult<Option<String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SessionError::Io(e)),
        };

        let token = content.trim();
        if token.is_empty() {
            return Ok(None);
        }
        Ok(Some(token.to_string()))
    }

    fn save(&self, token: &str) -> SessionResult<()> {
        if self.path.file_name().is_none() {
            return Err(SessionError::InvalidPath(self.path.clone()));
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(TOKEN_FILE_MODE);
        let mut file = options.open(&self.path)?;
        // `mode` only applies on creation; tighten a pre-existing file too.
        #[cfg(unix)]
        file.set_permissions(fs::Permissions::from_mode(TOKEN_FILE_MODE))?;
        file.write_all(token.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Io(e)),
        }
    }
}

// =============================================================================
// Memory Backend
// =============================================================================

/// Process-local backend. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryTokenPersistence {
    token: Mutex<Option<String>>,
}

impl MemoryTokenPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a token already "persisted".
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl fmt::Debug for MemoryTokenPersistence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stored = self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some();
        f.debug_struct("MemoryTokenPersistence")
            .field("stored", &stored)
            .finish()
    }
}

impl TokenPersistence for MemoryTokenPersistence {
    fn load(&self) -> SessionResult<Option<String>> {
        Ok(self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, token: &str) -> SessionResult<()> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
