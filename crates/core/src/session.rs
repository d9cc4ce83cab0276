//! Process-wide admin session
//!
//! The session is hydrated once at start-up from a [`SessionStore`],
//! established after a successful login and torn down on logout or when the
//! backend answers 401. Teardown clears storage and tells every subscriber,
//! which is the signal to return to the login screen.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use theradmin_domain::{AdminProfile, Result};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::ports::{SessionStore, TokenSource};

const EVENT_CAPACITY: usize = 16;

/// What gets persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub auth_token: String,
    #[serde(default)]
    pub user_data: Option<AdminProfile>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Logout,
    Unauthorized,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Started { admin: Option<AdminProfile> },
    Ended { reason: EndReason },
}

pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    current: RwLock<Option<StoredSession>>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionManager {
    /// Signed-out manager over `store`. Call [`hydrate`](Self::hydrate) to pick up a saved session.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { store, current: RwLock::new(None), events }
    }

    /// Restore a persisted session. Returns whether one was found.
    ///
    /// Unreadable storage counts as signed out and is cleared.
    pub async fn hydrate(&self) -> Result<bool> {
        let loaded = match self.store.load().await {
            Ok(loaded) => loaded.filter(|s| !s.auth_token.is_empty()),
            Err(err) => {
                warn!(error = %err, "discarding unreadable session");
                self.store.clear().await?;
                None
            }
        };

        let found = loaded.is_some();
        if let Some(session) = &loaded {
            debug!(has_profile = session.user_data.is_some(), "session restored");
            let _ = self.events.send(SessionEvent::Started { admin: session.user_data.clone() });
        }
        *self.current.write() = loaded;
        Ok(found)
    }

    /// Persist a fresh session after login.
    pub async fn establish(&self, token: String, admin: Option<AdminProfile>) -> Result<()> {
        let session = StoredSession { auth_token: token, user_data: admin.clone() };
        self.store.save(&session).await?;
        *self.current.write() = Some(session);
        info!("admin session established");
        let _ = self.events.send(SessionEvent::Started { admin });
        Ok(())
    }

    /// Replace the stored admin profile, keeping the token.
    pub async fn update_admin(&self, admin: AdminProfile) -> Result<()> {
        let updated = {
            let current = self.current.read();
            current.as_ref().map(|s| StoredSession {
                auth_token: s.auth_token.clone(),
                user_data: Some(admin),
            })
        };
        if let Some(session) = updated {
            self.store.save(&session).await?;
            *self.current.write() = Some(session);
        }
        Ok(())
    }

    /// Clear the session and notify subscribers.
    ///
    /// An unauthorized teardown with no active session is silent, so a burst
    /// of concurrent 401s yields a single `Ended` event.
    pub async fn teardown(&self, reason: EndReason) -> Result<()> {
        let had_session = self.current.write().take().is_some();
        let cleared = self.store.clear().await;

        if had_session || reason == EndReason::Logout {
            info!(?reason, "admin session ended");
            let _ = self.events.send(SessionEvent::Ended { reason });
        }
        cleared
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.read().is_some()
    }

    /// Bearer token of the current session.
    pub fn token(&self) -> Option<String> {
        self.current.read().as_ref().map(|s| s.auth_token.clone())
    }

    /// Profile stored with the current session, if the login returned one.
    pub fn admin(&self) -> Option<AdminProfile> {
        self.current.read().as_ref().and_then(|s| s.user_data.clone())
    }

    /// Sign-in and sign-out notifications from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}

#[async_trait]
impl TokenSource for SessionManager {
    fn access_token(&self) -> Option<String> {
        self.token()
    }

    async fn on_unauthorized(&self) {
        if let Err(err) = self.teardown(EndReason::Unauthorized).await {
            warn!(error = %err, "failed to clear session after 401");
        }
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;
    use theradmin_domain::AdminError;

    use super::*;

    #[derive(Default)]
    struct MemoryStore {
        inner: Mutex<Option<StoredSession>>,
        corrupt: bool,
    }

    #[async_trait]
    impl SessionStore for MemoryStore {
        async fn load(&self) -> Result<Option<StoredSession>> {
            if self.corrupt {
                return Err(AdminError::Storage("bad json".into()));
            }
            Ok(self.inner.lock().clone())
        }

        async fn save(&self, session: &StoredSession) -> Result<()> {
            *self.inner.lock() = Some(session.clone());
            Ok(())
        }

        async fn clear(&self) -> Result<()> {
            *self.inner.lock() = None;
            Ok(())
        }
    }

    fn admin() -> AdminProfile {
        AdminProfile { id: "1".into(), first_name: "Mary".into(), ..Default::default() }
    }

    #[tokio::test]
    async fn test_establish_then_hydrate() {
        let store = Arc::new(MemoryStore::default());
        let first = SessionManager::new(store.clone());
        first.establish("jwt-1".into(), Some(admin())).await.unwrap();

        let second = SessionManager::new(store);
        assert!(second.hydrate().await.unwrap());
        assert_eq!(second.access_token().as_deref(), Some("jwt-1"));
        assert_eq!(second.admin().map(|a| a.first_name), Some("Mary".to_string()));
    }

    #[tokio::test]
    async fn test_hydrate_discards_corrupt_store() {
        let store = Arc::new(MemoryStore { corrupt: true, ..Default::default() });
        let session = SessionManager::new(store);
        assert!(!session.hydrate().await.unwrap());
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_unauthorized_teardown_notifies_once() {
        let store = Arc::new(MemoryStore::default());
        let session = SessionManager::new(store.clone());
        session.establish("jwt-1".into(), None).await.unwrap();
        let mut events = session.subscribe();

        session.on_unauthorized().await;
        session.on_unauthorized().await;

        assert_eq!(
            events.recv().await.unwrap(),
            SessionEvent::Ended { reason: EndReason::Unauthorized }
        );
        assert!(events.try_recv().is_err());
        assert!(store.inner.lock().is_none());
        assert_eq!(session.access_token(), None);
    }

    #[tokio::test]
    async fn test_logout_always_notifies() {
        let session = SessionManager::new(Arc::new(MemoryStore::default()));
        let mut events = session.subscribe();
        session.teardown(EndReason::Logout).await.unwrap();
        assert_eq!(events.recv().await.unwrap(), SessionEvent::Ended { reason: EndReason::Logout });
    }
}
