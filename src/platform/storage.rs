//! Host key-value storage
//!
//! Writes are best-effort: a full or missing store is logged, never fatal.

use std::collections::HashMap;

/// String key-value store provided by the host
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    /// Returns `false` if the host refused the write
    fn set_item(&mut self, key: &str, value: &str) -> bool;
}

/// In-process store for native runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> bool {
        self.items.insert(key.to_string(), value.to_string());
        true
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Default)]
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - progress will not persist");
        }
        Self { storage }
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set_item(&mut self, key: &str, value: &str) -> bool {
        match &self.storage {
            Some(storage) => match storage.set_item(key, value) {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("Failed to write {}: {:?}", key, e);
                    false
                }
            },
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get_item("k"), None);
        assert!(store.set_item("k", "1"));
        assert!(store.set_item("k", "2"));
        assert_eq!(store.get_item("k").as_deref(), Some("2"));
    }
}
