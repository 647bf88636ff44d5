//! Application Configuration
//!
//! Compile-time defaults; there is no environment input in the browser.

/// Storage key prefix for persisted lists
pub const LIST_KEY_PREFIX: &str = "list-";

/// Title given to lists that have no stored record
pub const DEFAULT_LIST_TITLE: &str = "New List";

/// What to do when a stored record cannot be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorruptRecordPolicy {
    /// Log a warning, start the list fresh and overwrite the bad record
    #[default]
    Reset,
    /// Propagate the error to the caller
    Fail,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub key_prefix: String,
    pub default_title: String,
    pub log_level: log::Level,
    pub corrupt_records: CorruptRecordPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            key_prefix: LIST_KEY_PREFIX.to_string(),
            default_title: DEFAULT_LIST_TITLE.to_string(),
            log_level: log::Level::Info,
            corrupt_records: CorruptRecordPolicy::default(),
        }
    }
}

#[cfg(test)]
impl AppConfig {
    pub fn with_corrupt_records(mut self, policy: CorruptRecordPolicy) -> Self {
        self.corrupt_records = policy;
        self
    }
}
