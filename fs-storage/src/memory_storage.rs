use std::collections::BTreeMap;

use crate::base_storage::KeyValueStore;
use crate::utils::{entry_size, validate_key};
use data_error::{Result, VaultError};

/// In-process key-value storage, optionally bounded by a byte quota.
///
/// The quota counts key and value lengths of every entry, the same way
/// a browser accounts for its per-origin storage.
pub struct MemoryStorage {
    label: String,
    entries: BTreeMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new(label: String) -> Self {
        Self {
            label,
            entries: BTreeMap::new(),
            quota: None,
        }
    }

    pub fn with_quota(label: String, quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Self::new(label)
        }
    }

    /// Bytes currently accounted against the quota.
    pub fn used(&self) -> usize {
        self.entries
            .iter()
            .map(|(key, value)| entry_size(key, value))
            .sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;

        if let Some(quota) = self.quota {
            let replaced = self
                .entries
                .get(key)
                .map_or(0, |old| entry_size(key, old));
            let available = quota.saturating_sub(self.used() - replaced);
            let needed = entry_size(key, value);
            if needed > available {
                log::warn!(
                    "{} refused {} bytes for key {}, {} available",
                    self.label,
                    needed,
                    key,
                    available
                );
                return Err(VaultError::QuotaExceeded {
                    label: self.label.clone(),
                    needed,
                    available,
                });
            }
        }

        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        validate_key(key)?;
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_write_read() {
        let mut storage = MemoryStorage::new("TestStorage".to_string());
        assert!(storage.is_empty());

        storage.set("key1", "value1").unwrap();
        storage.set("key1", "value2").unwrap();

        assert_eq!(storage.len(), 1);
        assert_eq!(storage.get("key1").unwrap().as_deref(), Some("value2"));
        assert_eq!(storage.get("key2").unwrap(), None);

        storage.remove("key1").unwrap();
        storage.remove("key1").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_memory_storage_quota() {
        // "key" + "value" is exactly 8 bytes
        let mut storage =
            MemoryStorage::with_quota("TestStorage".to_string(), 8);

        storage.set("key", "value").unwrap();
        assert_eq!(storage.used(), 8);

        let err = storage.set("key", "value!").unwrap_err();
        assert!(err.is_quota_exceeded());
        // Failed write keeps the previous value
        assert_eq!(storage.get("key").unwrap().as_deref(), Some("value"));

        // Replacing with a smaller value frees room
        storage.set("key", "v").unwrap();
        assert_eq!(storage.used(), 4);
        storage.set("k2", "ab").unwrap();
        assert_eq!(storage.used(), 8);
    }
}
