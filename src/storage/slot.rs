//! Slot storage - named string values, one per app document
//!
//! A slot backend behaves like a browser's local storage: a flat map from
//! key to string, read and written whole. Apps never share a slot.

use crate::storage::error::{StorageError, StorageResult};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Default per-slot quota (5 MiB, the common local-storage budget)
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// A flat key/value store holding one serialized document per key
pub trait SlotStorage {
    /// Read a slot, `None` if it was never written or has been removed
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Overwrite a slot unconditionally
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Erase a slot; removing a missing slot is not an error
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// List all slot keys in ascending order
    fn keys(&self) -> StorageResult<Vec<String>>;
}

/// Reject values larger than `limit`
pub(crate) fn check_quota(key: &str, value: &str, limit: Option<usize>) -> StorageResult<()> {
    match limit {
        Some(limit) if value.len() > limit => Err(StorageError::QuotaExceeded {
            key: key.to_string(),
            size: value.len(),
            limit,
        }),
        _ => Ok(()),
    }
}

/// In-process slot storage, used by tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: RefCell<BTreeMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that refuses values larger than `bytes`
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            slots: RefCell::new(BTreeMap::new()),
            quota: Some(bytes),
        }
    }

    /// Number of slots currently held
    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }
}

impl SlotStorage for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        check_quota(key, value, self.quota)?;
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.slots.borrow_mut().remove(key);
        Ok(())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        Ok(self.slots.borrow().keys().cloned().collect())
    }
}
