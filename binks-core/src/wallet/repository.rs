//! Storage for the serialized wallet session.
//!
//! A repository holds at most one raw JSON entry. Parsing happens in the
//! session store so that a corrupt entry can be treated as "logged out".

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

use crate::error::{BinksError, Result};

/// Local-storage key the web client uses for the session entry
pub const SESSION_KEY: &str = "walletInfo";

/// Key-value slot holding the serialized session
pub trait SessionRepository: Send + Sync {
    /// Read the raw entry; `None` when absent
    fn load(&self) -> Result<Option<String>>;

    /// Replace the entry
    fn store(&self, raw: &str) -> Result<()>;

    /// Remove the entry; removing an absent entry is not an error
    fn clear(&self) -> Result<()>;
}

/// In-process repository, the equivalent of browser local storage
#[derive(Debug, Default)]
pub struct MemorySessionRepository {
    entry: Mutex<Option<String>>,
}

impl MemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a pre-existing raw entry
    pub fn with_entry(raw: impl Into<String>) -> Self {
        Self {
            entry: Mutex::new(Some(raw.into())),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>> {
        self.entry
            .lock()
            .map_err(|_| BinksError::Persistence("session storage lock poisoned".into()))
    }
}

impl SessionRepository for MemorySessionRepository {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.lock()?.clone())
    }

    fn store(&self, raw: &str) -> Result<()> {
        *self.lock()? = Some(raw.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.lock()? = None;
        Ok(())
    }
}

/// Repository backed by a single JSON file; a missing file means no session
#[derive(Debug)]
pub struct FileSessionRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSessionRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// `<dir>/walletInfo.json`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{}.json", SESSION_KEY)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| BinksError::Persistence("session file lock poisoned".into()))
    }
}

impl SessionRepository for FileSessionRepository {
    fn load(&self) -> Result<Option<String>> {
        let _guard = self.guard()?;
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&self, raw: &str) -> Result<()> {
        let _guard = self.guard()?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // Write then rename so a crash never leaves a half-written entry
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, raw)?;
        std::fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), "Session entry written");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let _guard = self.guard()?;
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_round_trip() {
        let repo = MemorySessionRepository::new();
        assert_eq!(repo.load().unwrap(), None);

        repo.store("{}").unwrap();
        assert_eq!(repo.load().unwrap().as_deref(), Some("{}"));

        repo.clear().unwrap();
        repo.clear().unwrap();
        assert_eq!(repo.load().unwrap(), None);
    }

    #[test]
    fn test_file_missing_means_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSessionRepository::in_dir(dir.path());
        assert_eq!(repo.load().unwrap(), None);
        repo.clear().unwrap();
    }

    #[test]
    fn test_file_store_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSessionRepository::new(dir.path().join("nested/session.json"));

        repo.store(r#"{"address":"0x1"}"#).unwrap();
        assert!(repo.path().exists());
        assert_eq!(repo.load().unwrap().as_deref(), Some(r#"{"address":"0x1"}"#));

        repo.clear().unwrap();
        assert!(!repo.path().exists());
    }
}
