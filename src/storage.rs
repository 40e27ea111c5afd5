use crate::constants::{DARK_MODE_KEY, DEFAULT_DARK_MODE, LINKS_KEY};
use crate::error::{QuickLinksError, Result};

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::sync::Mutex as AsyncMutex;
use tracing::warn;

/// Asynchronous key/value store holding the persisted popup state.
#[async_trait]
pub trait StorageService: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>>;
    async fn set(&self, key: &str, value: Value) -> Result<()>;
}

/// Stored link list; an absent key means no links yet.
pub async fn load_links(storage: &dyn StorageService) -> Result<Option<Vec<String>>> {
    match storage.get(LINKS_KEY).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Stored dark-mode flag. The default is applied here so callers never see an
/// absent flag.
pub async fn load_dark_mode(storage: &dyn StorageService) -> Result<bool> {
    match storage.get(DARK_MODE_KEY).await? {
        Some(Value::Bool(flag)) => Ok(flag),
        Some(Value::Null) | None => Ok(DEFAULT_DARK_MODE),
        Some(other) => Ok(serde_json::from_value(other)?),
    }
}

pub async fn save_links(storage: &dyn StorageService, links: &[String]) -> Result<()> {
    storage.set(LINKS_KEY, serde_json::to_value(links)?).await
}

pub async fn save_dark_mode(storage: &dyn StorageService, dark_mode: bool) -> Result<()> {
    storage.set(DARK_MODE_KEY, Value::Bool(dark_mode)).await
}

/// In-process store. Clones share the same map, so a test can keep one handle
/// and give another to the app.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, Value>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let map = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self {
            entries: Arc::new(Mutex::new(map)),
        }
    }

    pub fn snapshot(&self, key: &str) -> Option<Value> {
        self.entries
            .lock()
            .map(|entries| entries.get(key).cloned())
            .unwrap_or(None)
    }
}

#[async_trait]
impl StorageService for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.snapshot(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value);
        }
        Ok(())
    }
}

/// All keys in one JSON object file. Writes go through a temp file and a
/// rename so a crash never leaves half a document behind.
pub struct JsonFileStorage {
    path: PathBuf,
    // Serialises read-modify-write cycles on the file.
    lock: AsyncMutex<()>,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: AsyncMutex::new(()),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    async fn read_document(&self) -> Result<Map<String, Value>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(|b| b.is_ascii_whitespace()) => Ok(Map::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_document(&self, document: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(document)?).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl StorageService for JsonFileStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await?;
        Ok(document.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let _guard = self.lock.lock().await;
        // An unparseable store is replaced rather than blocking every later write.
        let mut document = match self.read_document().await {
            Ok(document) => document,
            Err(QuickLinksError::Json(e)) => {
                warn!("discarding unreadable store {}: {e}", self.path.display());
                Map::new()
            }
            Err(e) => return Err(e),
        };
        document.insert(key.to_string(), value);
        self.write_document(&document).await
    }
}
