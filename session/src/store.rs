//! Token store: persistent key-value storage for the session snapshot.
//!
//! Provides a trait-based abstraction so the session manager can persist
//! its snapshot to any durable local store (browser localStorage in the
//! original deployment, a file or an in-memory slot here) without caring
//! which one is underneath.

use crate::error::{SessionError, SessionResult};
use campus_commons::AuthConstants;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Storage backend for the serialized session snapshot.
///
/// A pure byte-string container under one fixed key: no encryption, no
/// expiry enforcement at this layer. Every `set`/`remove` is immediately
/// durable (synchronous write-through); there is no batching.
///
/// # Security Note
///
/// Implementations must protect the stored tokens appropriately: files
/// should use restrictive permissions (0600 on Unix) and token values must
/// never be logged.
pub trait TokenStore: Send + Sync {
    /// Retrieve the stored snapshot, or `None` when nothing is stored.
    fn get(&self) -> SessionResult<Option<String>>;

    /// Store the snapshot, overwriting any previous value.
    fn set(&self, raw: &str) -> SessionResult<()>;

    /// Delete the stored snapshot. Succeeds when nothing was stored.
    fn remove(&self) -> SessionResult<()>;

    /// Whether a snapshot is currently stored.
    fn is_present(&self) -> bool {
        matches!(self.get(), Ok(Some(_)))
    }
}

/// In-memory token store, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> SessionResult<Option<String>> {
        Ok(self.slot.lock().unwrap().clone())
    }

    fn set(&self, raw: &str) -> SessionResult<()> {
        *self.slot.lock().unwrap() = Some(raw.to_string());
        Ok(())
    }

    fn remove(&self) -> SessionResult<()> {
        *self.slot.lock().unwrap() = None;
        Ok(())
    }
}

/// File-backed token store.
///
/// Persists the snapshot as a single file named by
/// [`AuthConstants::SESSION_STORAGE_KEY`] inside a caller-supplied
/// directory, with 0600 permissions on Unix.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store rooted at `dir`. The directory is created on the
    /// first write.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        FileTokenStore {
            path: dir.as_ref().join(AuthConstants::SESSION_STORAGE_KEY),
        }
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(e: io::Error) -> SessionError {
        SessionError::Storage(e.to_string())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> SessionResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_err(e)),
        }
    }

    fn set(&self, raw: &str) -> SessionResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(Self::io_err)?;
        }
        fs::write(&self.path, raw).map_err(Self::io_err)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))
                .map_err(Self::io_err)?;
        }
        Ok(())
    }

    fn remove(&self) -> SessionResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_err(e)),
        }
    }
}
