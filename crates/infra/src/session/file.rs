use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use theradmin_core::{SessionStore, StoredSession};
use theradmin_domain::Result;
use tracing::debug;

use crate::errors::InfraError;

/// Session persisted as a JSON document with `auth_token` and `user_data`
/// keys.
///
/// Writes go to a sibling `.tmp` file that is then renamed over the target.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store at `path`. Nothing touches the disk until the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<StoredSession>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(InfraError::from(err).into()),
        };
        if contents.trim().is_empty() {
            return Ok(None);
        }

        let session: StoredSession =
            serde_json::from_str(&contents).map_err(InfraError::from)?;
        debug!(path = %self.path.display(), "loaded persisted session");
        Ok(Some(session))
    }

    async fn save(&self, session: &StoredSession) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(InfraError::from)?;
        }
        let json = serde_json::to_vec_pretty(session).map_err(InfraError::from)?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, json).await.map_err(InfraError::from)?;
        tokio::fs::rename(&temp, &self.path).await.map_err(InfraError::from)?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(InfraError::from(err).into()),
        }
    }
}
