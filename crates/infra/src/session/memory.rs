use async_trait::async_trait;
use parking_lot::Mutex;
use theradmin_core::{SessionStore, StoredSession};
use theradmin_domain::Result;

/// Process-local store; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<Option<StoredSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of what is stored right now.
    pub fn snapshot(&self) -> Option<StoredSession> {
        self.inner.lock().clone()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<StoredSession>> {
        Ok(self.inner.lock().clone())
    }

    async fn save(&self, session: &StoredSession) -> Result<()> {
        *self.inner.lock() = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.inner.lock().take();
        Ok(())
    }
}
