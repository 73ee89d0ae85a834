use anyhow::{Context, Result};
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Client-local string key-value storage, in the shape of a browser's local storage
pub trait KeyValueStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// Storage that lives only as long as the process
#[derive(Default)]
pub struct MemoryStorage {
    items: DashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).map(|entry| entry.value().clone()))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

/// Storage backed by a single JSON object file.
///
/// Every mutation rewrites the whole file through a temporary sibling and a rename.
pub struct FileStorage {
    items: Mutex<BTreeMap<String, String>>,
    path: PathBuf,
}

impl FileStorage {
    /// Open the storage file, starting empty when it is missing or unreadable as JSON
    pub fn open(path: PathBuf) -> Result<Self> {
        let items = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<BTreeMap<String, String>>(&content) {
                Ok(items) => items,
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "Storage file is not a JSON object of strings, starting empty"
                    );
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(e)
                    .context(format!("Failed to read storage file: {}", path.display()))
            }
        };

        Ok(Self {
            items: Mutex::new(items),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, items: &BTreeMap<String, String>) -> Result<()> {
        let content = serde_json::to_string_pretty(items).context("Failed to encode storage")?;
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, content)
            .context(format!("Failed to write storage file: {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path)
            .context(format!("Failed to replace storage file: {}", self.path.display()))?;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        let previous = items.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush(&items) {
            // Keep memory in step with what is on disk
            match previous {
                Some(previous) => items.insert(key.to_string(), previous),
                None => items.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        let Some(previous) = items.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.flush(&items) {
            items.insert(key.to_string(), previous);
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("currentUser").unwrap(), None);

        storage.set_item("currentUser", "value").unwrap();
        assert_eq!(storage.get_item("currentUser").unwrap().as_deref(), Some("value"));

        storage.remove_item("currentUser").unwrap();
        storage.remove_item("currentUser").unwrap();
        assert_eq!(storage.get_item("currentUser").unwrap(), None);
    }

    #[test]
    fn test_file_storage_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");

        let storage = FileStorage::open(path.clone()).unwrap();
        storage.set_item("currentUser", r#"{"id":1,"username":"admin"}"#).unwrap();
        storage.set_item("theme", "dark").unwrap();
        drop(storage);

        let reopened = FileStorage::open(path.clone()).unwrap();
        assert_eq!(
            reopened.get_item("currentUser").unwrap().as_deref(),
            Some(r#"{"id":1,"username":"admin"}"#)
        );

        reopened.remove_item("currentUser").unwrap();
        drop(reopened);

        let reopened = FileStorage::open(path).unwrap();
        assert_eq!(reopened.get_item("currentUser").unwrap(), None);
        assert_eq!(reopened.get_item("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_file_storage_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::open(temp_dir.path().join("absent.json")).unwrap();
        assert_eq!(storage.get_item("currentUser").unwrap(), None);
        // Removing from an empty store does not create the file
        storage.remove_item("currentUser").unwrap();
        assert!(!storage.path().exists());
    }

    #[test]
    fn test_file_storage_garbage_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        fs::write(&path, "not json at all").unwrap();

        let storage = FileStorage::open(path).unwrap();
        assert_eq!(storage.get_item("currentUser").unwrap(), None);
    }
}
