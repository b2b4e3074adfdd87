//! Durable mirror storage for the cart.
//!
//! The mirror is a single-key store holding the JSON-serialized line list.
//! [`FileStore`] is the on-device implementation; [`MemoryStore`] backs
//! tests and simulated restarts.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;

/// File name of the mirror inside a [`FileStore`] directory.
const CART_FILE_NAME: &str = "cart.json";

/// Errors from the durable store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying storage failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Single-key durable store for the serialized cart.
///
/// Implementations must tolerate the key being absent (`load` returns
/// `Ok(None)`) and must make `save` replace the previous payload as a unit.
#[async_trait]
pub trait CartStore: Send + Sync + 'static {
    /// Read the persisted payload, `None` when nothing was ever saved.
    async fn load(&self) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replace the persisted payload.
    async fn save(&self, payload: &[u8]) -> Result<(), StoreError>;
}

/// In-memory store. Clones share the same buffer, which lets tests hand the
/// "same device storage" to a fresh engine to simulate an app restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Option<Vec<u8>>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an existing payload.
    #[must_use]
    pub fn with_payload(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some(payload.into()))),
        }
    }
}

#[async_trait]
impl CartStore for MemoryStore {
    async fn load(&self) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone())
    }

    async fn save(&self, payload: &[u8]) -> Result<(), StoreError> {
        *self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(payload.to_vec());
        Ok(())
    }
}

/// File-backed store keeping the cart in `<dir>/cart.json`.
///
/// Writes go to a temporary file in the same directory followed by a rename,
/// so a crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store the cart under the given directory.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(CART_FILE_NAME),
        }
    }

    /// Path of the mirror file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CartStore for FileStore {
    async fn load(&self) -> Result<Option<Vec<u8>>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, payload: &[u8]) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, payload).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
