use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use url::form_urlencoded;

/// File-backed key-value storage: one `<key>.json` file per key under `base_path`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    /// Maps a namespaced key such as `@RocketShoes:cart` to a file name by
    /// form-urlencoding it, so distinct keys never share a file.
    pub fn file_path(&self, key: &str) -> PathBuf {
        let file_name: String = form_urlencoded::byte_serialize(key.as_bytes()).collect();
        Path::new(&self.base_path).join(format!("{}.json", file_name))
    }
}

impl Storage for LocalStorage {
    async fn read_item(&self, key: &str) -> Result<Option<String>> {
        let full_path = self.file_path(key);
        match fs::read_to_string(&full_path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_item(&self, key: &str, value: &str) -> Result<()> {
        let full_path = self.file_path(key);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, value)?;
        Ok(())
    }
}

/// In-memory storage, shared between clones.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_item(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .items
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        storage
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        self.items.lock().await.get(key).cloned()
    }
}

impl Storage for MemoryStorage {
    async fn read_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key).await)
    }

    async fn write_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.lock().await;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
