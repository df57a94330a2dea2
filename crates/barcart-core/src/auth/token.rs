use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Token file name in cache directory
const TOKEN_FILE: &str = "token.json";

/// Source of the bearer token used for authenticated requests.
///
/// `get` is a cheap synchronous read; the client calls it once per
/// operation before building the request.
pub trait TokenProvider: Send + Sync {
    fn get(&self) -> Option<String>;

    fn set(&self, token: &str) -> Result<()>;

    fn clear(&self) -> Result<()>;

    /// When the current token was stored, for stores that record it.
    fn saved_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }
}

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenProvider for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, token: &str) -> Result<()> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRecord {
    pub token: String,
    pub saved_at: DateTime<Utc>,
}

/// Token persisted as JSON under the cache directory.
pub struct FileTokenStore {
    path: PathBuf,
    record: RwLock<Option<TokenRecord>>,
}

impl FileTokenStore {
    /// Open the store in `cache_dir`, loading any token already saved there.
    pub fn open(cache_dir: &Path) -> Result<Self> {
        let path = cache_dir.join(TOKEN_FILE);
        let record = Self::load(&path)?;
        Ok(Self {
            path,
            record: RwLock::new(record),
        })
    }

    fn load(path: &Path) -> Result<Option<TokenRecord>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path).context("Failed to read token file")?;
        match serde_json::from_str::<TokenRecord>(&contents) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                // Unreadable file means anonymous, not a hard failure
                warn!(error = %e, path = %path.display(), "Ignoring malformed token file");
                Ok(None)
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenProvider for FileTokenStore {
    fn get(&self) -> Option<String> {
        self.record
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|r| r.token.clone())
    }

    fn saved_at(&self) -> Option<DateTime<Utc>> {
        self.record
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|r| r.saved_at)
    }

    fn set(&self, token: &str) -> Result<()> {
        let record = TokenRecord {
            token: token.to_string(),
            saved_at: Utc::now(),
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create token directory")?;
        }
        let contents = serde_json::to_string_pretty(&record)?;
        std::fs::write(&self.path, contents).context("Failed to write token file")?;
        *self.record.write().unwrap_or_else(PoisonError::into_inner) = Some(record);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.record.write().unwrap_or_else(PoisonError::into_inner) = None;
        if self.path.exists() {
            std::fs::remove_file(&self.path).context("Failed to remove token file")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_set_and_clear() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.get(), None);
        assert!(!store.is_authenticated());

        store.set("abc").unwrap();
        assert_eq!(store.get().as_deref(), Some("abc"));
        assert!(store.is_authenticated());

        store.clear().unwrap();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = TempDir::new().unwrap();

        let store = FileTokenStore::open(dir.path()).unwrap();
        assert_eq!(store.get(), None);
        assert!(store.saved_at().is_none());
        store.set("persisted").unwrap();
        assert!(store.saved_at().is_some());

        let reopened = FileTokenStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get().as_deref(), Some("persisted"));

        reopened.clear().unwrap();
        assert!(!reopened.path().exists());
        assert_eq!(FileTokenStore::open(dir.path()).unwrap().get(), None);
    }

    #[test]
    fn test_file_store_creates_missing_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");

        let store = FileTokenStore::open(&nested).unwrap();
        store.set("t").unwrap();
        assert!(nested.join(TOKEN_FILE).exists());
    }

    #[test]
    fn test_saved_at_through_trait_object() {
        let dir = TempDir::new().unwrap();
        let provider: Arc<dyn TokenProvider> = Arc::new(FileTokenStore::open(dir.path()).unwrap());
        assert!(provider.saved_at().is_none());
        provider.set("t").unwrap();
        assert!(provider.saved_at().is_some());

        let memory: Arc<dyn TokenProvider> = Arc::new(MemoryTokenStore::with_token("t"));
        assert!(memory.saved_at().is_none());
    }

    #[test]
    fn test_file_store_reports_unwritable_dir() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "a file, not a directory").unwrap();

        let store = FileTokenStore::open(&blocker.join("tokens")).unwrap();
        let err = store.set("t").unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to create token directory"));
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_file_store_ignores_malformed_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(TOKEN_FILE), "not json").unwrap();

        let store = FileTokenStore::open(dir.path()).unwrap();
        assert_eq!(store.get(), None);
    }
}
