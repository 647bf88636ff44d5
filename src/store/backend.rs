//! Key-Value Storage Backends
//!
//! The browser's `localStorage`, plus an in-memory stand-in for native tests.

use super::{StoreError, StoreResult};

/// String key-value storage with the same surface as `window.localStorage`
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;

    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()>;

    fn remove_item(&mut self, key: &str) -> StoreResult<()>;

    /// All keys, in whatever order the backend enumerates them
    fn keys(&self) -> StoreResult<Vec<String>>;

    /// Remove every key, including ones this app did not write
    fn clear(&mut self) -> StoreResult<()>;
}

/// `window.localStorage`, looked up on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage(&self) -> StoreResult<web_sys::Storage> {
        let window = web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StoreError::Unavailable("localStorage is disabled".to_string()))
    }
}

fn backend_error(operation: &'static str, err: wasm_bindgen::JsValue) -> StoreError {
    StoreError::Backend {
        operation,
        message: format!("{:?}", err),
    }
}

impl KeyValueStorage for LocalStorage {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|e| backend_error("getItem", e))
    }

    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| backend_error("setItem", e))
    }

    fn remove_item(&mut self, key: &str) -> StoreResult<()> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| backend_error("removeItem", e))
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let storage = self.storage()?;
        let len = storage.length().map_err(|e| backend_error("length", e))?;
        let mut keys = Vec::with_capacity(len as usize);
        for i in 0..len {
            if let Some(key) = storage.key(i).map_err(|e| backend_error("key", e))? {
                keys.push(key);
            }
        }
        Ok(keys)
    }

    fn clear(&mut self) -> StoreResult<()> {
        self.storage()?.clear().map_err(|e| backend_error("clear", e))
    }
}

/// In-memory storage that keeps insertion order, so enumeration order is
/// reproducible in tests
#[cfg(test)]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStorage {
    entries: Vec<(String, String)>,
    /// When set, writes fail the way a full `localStorage` does
    fail_writes: bool,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            fail_writes: false,
        }
    }

    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self
            .entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone()))
    }

    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()> {
        if self.fail_writes {
            return Err(StoreError::Backend {
                operation: "setItem",
                message: "QuotaExceededError".to_string(),
            });
        }
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> StoreResult<()> {
        self.entries.retain(|(k, _)| k != key);
        Ok(())
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        Ok(self.entries.iter().map(|(k, _)| k.clone()).collect())
    }

    fn clear(&mut self) -> StoreResult<()> {
        self.entries.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_overwrites_in_place() {
        let mut storage = MemoryStorage::with_entries([("b", "1"), ("a", "2")]);
        storage.set_item("b", "3").unwrap();

        assert_eq!(storage.keys().unwrap(), vec!["b", "a"]);
        assert_eq!(storage.get_item("b").unwrap().as_deref(), Some("3"));
    }

    #[test]
    fn test_memory_storage_remove_and_clear() {
        let mut storage = MemoryStorage::with_entries([("a", "1"), ("b", "2")]);
        storage.remove_item("a").unwrap();
        assert_eq!(storage.get_item("a").unwrap(), None);
        assert_eq!(storage.len(), 1);

        storage.clear().unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_memory_storage_failing_writes_leave_entries() {
        let mut storage = MemoryStorage::with_entries([("a", "1")]);
        storage.fail_writes(true);

        assert!(matches!(
            storage.set_item("a", "2"),
            Err(StoreError::Backend { operation: "setItem", .. })
        ));
        assert_eq!(storage.get_item("a").unwrap().as_deref(), Some("1"));
    }
}
