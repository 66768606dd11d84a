//! Persistent store for failed login attempts
//!
//! Two variants: [`AttemptStore`] keeps the counter in a JSON file so the
//! throttle survives restarts, [`MemoryAttemptStore`] keeps it for the
//! lifetime of the process only.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use rts_domain::model::LoginAttempts;
use rts_domain::repository::LoginAttemptRepository;
use rts_types::{Error, Result, StoreError};

/// Storage key of the attempt counter
pub const STORAGE_KEY: &str = "rts_login_attempts";

/// File-backed login attempt store
pub struct AttemptStore {
    store_path: PathBuf,
}

impl AttemptStore {
    /// Create or open a store inside `store_dir`
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let store_path = store_dir.join(format!("{STORAGE_KEY}.json"));
        Ok(Self { store_path })
    }

    pub fn path(&self) -> &Path {
        &self.store_path
    }
}

impl LoginAttemptRepository for AttemptStore {
    fn load(&self) -> std::result::Result<LoginAttempts, Error> {
        if !self.store_path.exists() {
            return Ok(LoginAttempts::reset());
        }
        let file = File::open(&self.store_path)?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| {
            StoreError::Corrupted(format!("{}: {}", self.store_path.display(), e)).into()
        })
    }

    fn save(&self, attempts: &LoginAttempts) -> std::result::Result<(), Error> {
        let file = File::create(&self.store_path)
            .map_err(|e| StoreError::IoError(format!("{}: {}", self.store_path.display(), e)))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer(writer, attempts)?;
        debug!("stored login attempts: count={}", attempts.count);
        Ok(())
    }
}

/// In-process login attempt store
#[derive(Default)]
pub struct MemoryAttemptStore {
    attempts: Mutex<LoginAttempts>,
}

impl MemoryAttemptStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LoginAttemptRepository for MemoryAttemptStore {
    fn load(&self) -> std::result::Result<LoginAttempts, Error> {
        let guard = self
            .attempts
            .lock()
            .map_err(|_| StoreError::IoError("attempt store lock poisoned".to_string()))?;
        Ok(*guard)
    }

    fn save(&self, attempts: &LoginAttempts) -> std::result::Result<(), Error> {
        let mut guard = self
            .attempts
            .lock()
            .map_err(|_| StoreError::IoError("attempt store lock poisoned".to_string()))?;
        *guard = *attempts;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_loads_reset_counter() {
        let dir = tempdir().unwrap();
        let store = AttemptStore::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.load().unwrap(), LoginAttempts::reset());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let attempts = LoginAttempts {
            count: 3,
            timestamp: 1_700_000_000_000,
        };
        {
            let store = AttemptStore::open(dir.path().to_path_buf()).unwrap();
            store.save(&attempts).unwrap();
        }
        let reopened = AttemptStore::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(reopened.load().unwrap(), attempts);
    }

    #[test]
    fn test_file_layout() {
        let dir = tempdir().unwrap();
        let store = AttemptStore::open(dir.path().join("nested")).unwrap();
        store
            .save(&LoginAttempts {
                count: 1,
                timestamp: 42,
            })
            .unwrap();
        assert!(store.path().ends_with("rts_login_attempts.json"));
        let raw = fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, r#"{"count":1,"timestamp":42}"#);
    }

    #[test]
    fn test_corrupted_file_is_reported() {
        let dir = tempdir().unwrap();
        let store = AttemptStore::open(dir.path().to_path_buf()).unwrap();
        fs::write(store.path(), "not json").unwrap();
        assert!(matches!(
            store.load(),
            Err(Error::Store(StoreError::Corrupted(_)))
        ));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryAttemptStore::new();
        assert_eq!(store.load().unwrap().count, 0);
        store.save(&LoginAttempts::reset().recorded(10)).unwrap();
        assert_eq!(store.load().unwrap().count, 1);
        assert_eq!(store.load().unwrap().timestamp, 10);
    }
}
