//! List Store
//!
//! Persistence contract between a list and its storage record.
//! Every write is a full overwrite of `list-{id}`.

mod backend;

pub use backend::{KeyValueStorage, LocalStorage};
#[cfg(test)]
pub use backend::MemoryStorage;

use std::fmt;

use crate::models::{ListId, ListRecord};

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-level errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No window, or local storage is disabled
    Unavailable(String),
    /// A storage call threw (quota exceeded, security error, ...)
    Backend {
        operation: &'static str,
        message: String,
    },
    /// A record exists but is not a valid list record
    Corrupt { key: String, reason: String },
    /// A list key whose number does not fit a list id
    KeyOutOfRange(String),
    Encode(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(msg) => write!(f, "Storage unavailable: {}", msg),
            StoreError::Backend { operation, message } => {
                write!(f, "Storage {} failed: {}", operation, message)
            }
            StoreError::Corrupt { key, reason } => {
                write!(f, "Corrupt record {}: {}", key, reason)
            }
            StoreError::KeyOutOfRange(key) => {
                write!(f, "List key {} is out of range and was not loaded", key)
            }
            StoreError::Encode(msg) => write!(f, "Encode error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// How a storage key relates to this store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredKey {
    List(ListId),
    /// Shaped like a list key, but the number does not fit a `ListId`
    OutOfRange,
    Foreign,
}

/// Result of enumerating the storage namespace
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyScan {
    /// Ascending, without duplicates
    pub ids: Vec<ListId>,
    pub out_of_range: Vec<String>,
}

/// Typed access to list records over a key-value backend
#[derive(Debug, Clone)]
pub struct ListStore<S> {
    backend: S,
    prefix: String,
}

impl<S: KeyValueStorage> ListStore<S> {
    pub fn new(backend: S, prefix: impl Into<String>) -> Self {
        Self {
            backend,
            prefix: prefix.into(),
        }
    }

    pub fn key(&self, id: ListId) -> String {
        format!("{}{}", self.prefix, id)
    }

    /// Classify a storage key. Suffixes with leading zeros are foreign.
    pub fn classify_key(&self, key: &str) -> StoredKey {
        let Some(digits) = key.strip_prefix(self.prefix.as_str()) else {
            return StoredKey::Foreign;
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return StoredKey::Foreign;
        }
        if digits.len() > 1 && digits.starts_with('0') {
            return StoredKey::Foreign;
        }
        match digits.parse() {
            Ok(n) => StoredKey::List(ListId(n)),
            Err(_) => StoredKey::OutOfRange,
        }
    }

    /// Parse a storage key back into a list id
    #[cfg(test)]
    pub fn parse_key(&self, key: &str) -> Option<ListId> {
        match self.classify_key(key) {
            StoredKey::List(id) => Some(id),
            StoredKey::OutOfRange | StoredKey::Foreign => None,
        }
    }

    /// Read a record; `Ok(None)` when the key is absent
    pub fn get(&self, id: ListId) -> StoreResult<Option<ListRecord>> {
        let key = self.key(id);
        let Some(json) = self.backend.get_item(&key)? else {
            return Ok(None);
        };
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| StoreError::Corrupt {
                key,
                reason: e.to_string(),
            })
    }

    pub fn set(&mut self, id: ListId, record: &ListRecord) -> StoreResult<()> {
        let json = serde_json::to_string(record).map_err(|e| StoreError::Encode(e.to_string()))?;
        let key = self.key(id);
        self.backend.set_item(&key, &json)?;
        log::debug!("[STORE] wrote {} ({} items)", key, record.items.len());
        Ok(())
    }

    pub fn remove(&mut self, id: ListId) -> StoreResult<()> {
        let key = self.key(id);
        self.backend.remove_item(&key)?;
        log::debug!("[STORE] removed {}", key);
        Ok(())
    }

    /// Ids of every persisted list, ascending, regardless of backend order.
    /// List keys too large for an id are reported, not dropped silently.
    pub fn scan(&self) -> StoreResult<KeyScan> {
        let mut scan = KeyScan::default();
        for key in self.backend.keys()? {
            match self.classify_key(&key) {
                StoredKey::List(id) => scan.ids.push(id),
                StoredKey::OutOfRange => {
                    log::warn!("[STORE] list key {:?} is out of range, not loading it", key);
                    scan.out_of_range.push(key);
                }
                StoredKey::Foreign => log::debug!("[STORE] skipping foreign key {:?}", key),
            }
        }
        scan.ids.sort();
        scan.ids.dedup();
        Ok(scan)
    }

    /// Wipe the whole storage namespace, not only list keys
    pub fn clear(&mut self) -> StoreResult<()> {
        self.backend.clear()?;
        log::info!("[STORE] storage cleared");
        Ok(())
    }

    #[cfg(test)]
    pub fn backend(&self) -> &S {
        &self.backend
    }

    #[cfg(test)]
    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }
}
