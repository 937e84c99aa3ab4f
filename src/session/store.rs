// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The current session credential.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::broadcast;
use tracing::{info, warn};

use super::persistence::{MemoryTokenPersistence, TokenPersistence};
use super::SessionResult;

/// Buffered session events per subscriber before the oldest are dropped.
const EVENT_CAPACITY: usize = 16;

/// Session lifecycle notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A credential was stored.
    SignedIn,
    /// The caller cleared the credential.
    SignedOut,
    /// The service rejected the credential (HTTP 401). It has already been
    /// cleared; the host should navigate to `login_path`.
    Expired { login_path: String },
}

struct Inner {
    token: RwLock<Option<String>>,
    persistence: Box<dyn TokenPersistence>,
    events: broadcast::Sender<SessionEvent>,
}

/// Shared handle over the single live credential.
///
/// Clones point at the same credential. Every write is visible to the
/// next request immediately.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl SessionStore {
    /// Build a store seeded from the persisted copy.
    ///
    /// An unreadable persisted token is logged and treated as absent, so a
    /// corrupt session file never prevents start-up.
    pub fn restore(persistence: impl TokenPersistence + 'static) -> Self {
        let token = match persistence.load() {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Failed to read persisted session, starting signed out");
                None
            }
        };
        Self::from_parts(token, Box::new(persistence))
    }

    /// Empty store backed by memory only.
    pub fn ephemeral() -> Self {
        Self::from_parts(None, Box::new(MemoryTokenPersistence::new()))
    }

    fn from_parts(token: Option<String>, persistence: Box<dyn TokenPersistence>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                token: RwLock::new(token),
                persistence,
                events,
            }),
        }
    }

    /// Current credential, if any.
    pub fn get(&self) -> Option<String> {
        self.inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_active(&self) -> bool {
        self.inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Replace the credential (`Some`) or clear it (`None`). A blank token
    /// is no credential and clears the session.
    ///
    /// The in-memory value changes first; the persisted copy follows. If
    /// persisting fails the error is returned but the new in-memory state
    /// stays in effect.
    pub fn set(&self, token: Option<String>) -> SessionResult<()> {
        match token.filter(|t| !t.trim().is_empty()) {
            Some(token) => {
                self.replace(Some(token.clone()));
                info!("Session credential stored");
                let _ = self.inner.events.send(SessionEvent::SignedIn);
                self.inner.persistence.save(&token)
            }
            None => {
                let previous = self.replace(None);
                if previous.is_some() {
                    info!("Session credential cleared");
                    let _ = self.inner.events.send(SessionEvent::SignedOut);
                }
                self.inner.persistence.clear()
            }
        }
    }

    /// Shorthand for `set(None)`.
    pub fn clear(&self) -> SessionResult<()> {
        self.set(None)
    }

    /// Drop the credential after the service rejected it and announce the
    /// expiry. Persistence failures are logged, never returned: the caller
    /// is about to receive `Unauthorized` regardless.
    pub(crate) fn expire(&self, login_path: &str) {
        self.replace(None);
        if let Err(e) = self.inner.persistence.clear() {
            warn!(error = %e, "Failed to remove persisted session after expiry");
        }
        let _ = self.inner.events.send(SessionEvent::Expired {
            login_path: login_path.to_string(),
        });
    }

    /// Receive session events emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    fn replace(&self, token: Option<String>) -> Option<String> {
        let mut guard = self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, token)
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("active", &self.is_active())
            .field("persistence", &self.inner.persistence)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{FileTokenPersistence, SessionError};
    use tempfile::TempDir;

    #[test]
    fn starts_empty() {
        let session = SessionStore::ephemeral();
        assert_eq!(session.get(), None);
        assert!(!session.is_active());
    }

    #[test]
    fn set_and_clear() {
        let session = SessionStore::ephemeral();
        session.set(Some("tok123".to_string())).unwrap();
        assert_eq!(session.get(), Some("tok123".to_string()));
        assert!(session.is_active());

        session.clear().unwrap();
        assert_eq!(session.get(), None);
        assert!(!session.is_active());
    }

    #[test]
    fn blank_token_counts_as_signed_out() {
        let session = SessionStore::restore(MemoryTokenPersistence::with_token("old"));
        session.set(Some(String::new())).unwrap();
        assert!(!session.is_active());
        assert_eq!(session.get(), None);

        session.set(Some("  ".to_string())).unwrap();
        assert!(!session.is_active());
    }

    #[test]
    fn blank_token_matches_persisted_state_after_restart() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("session");

        let first = SessionStore::restore(FileTokenPersistence::new(&path));
        first.set(Some("tok".to_string())).unwrap();
        first.set(Some(String::new())).unwrap();
        assert!(!first.is_active());
        assert!(!path.exists());

        let second = SessionStore::restore(FileTokenPersistence::new(&path));
        assert_eq!(second.is_active(), first.is_active());
    }

    #[test]
    fn last_writer_wins_across_clones() {
        let a = SessionStore::ephemeral();
        let b = a.clone();
        a.set(Some("first".to_string())).unwrap();
        b.set(Some("second".to_string())).unwrap();
        assert_eq!(a.get(), Some("second".to_string()));
    }

    #[test]
    fn restore_seeds_from_persisted_copy() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("session");

        let first = SessionStore::restore(FileTokenPersistence::new(&path));
        first.set(Some("persisted".to_string())).unwrap();
        drop(first);

        let second = SessionStore::restore(FileTokenPersistence::new(&path));
        assert_eq!(second.get(), Some("persisted".to_string()));

        second.clear().unwrap();
        let third = SessionStore::restore(FileTokenPersistence::new(&path));
        assert_eq!(third.get(), None);
    }

    #[test]
    fn restore_survives_unreadable_file() {
        let temp = TempDir::new().unwrap();
        // A directory where the token file should be cannot be read as text.
        let session = SessionStore::restore(FileTokenPersistence::new(temp.path()));
        assert!(!session.is_active());
    }

    #[test]
    fn in_memory_state_applies_even_if_persisting_fails() {
        let temp = TempDir::new().unwrap();
        let session = SessionStore::restore(FileTokenPersistence::new(temp.path()));
        let result = session.set(Some("tok".to_string()));
        assert!(matches!(result, Err(SessionError::Io(_))));
        assert_eq!(session.get(), Some("tok".to_string()));
    }

    #[tokio::test]
    async fn emits_sign_in_and_sign_out() {
        let session = SessionStore::ephemeral();
        let mut events = session.subscribe();

        session.set(Some("tok".to_string())).unwrap();
        session.clear().unwrap();
        // Clearing an already empty session is silent.
        session.clear().unwrap();

        assert_eq!(events.recv().await.unwrap(), SessionEvent::SignedIn);
        assert_eq!(events.recv().await.unwrap(), SessionEvent::SignedOut);
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn expire_clears_before_announcing() {
        let session = SessionStore::restore(MemoryTokenPersistence::with_token("old"));
        assert!(session.is_active());
        let mut events = session.subscribe();

        session.expire("/login");

        assert!(!session.is_active());
        assert_eq!(
            events.recv().await.unwrap(),
            SessionEvent::Expired {
                login_path: "/login".to_string()
            }
        );
    }

    #[test]
    fn debug_hides_token() {
        let session = SessionStore::ephemeral();
        session.set(Some("very-secret".to_string())).unwrap();
        assert!(!format!("{session:?}").contains("very-secret"));
    }
}
