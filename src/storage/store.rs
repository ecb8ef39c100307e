//! Persistent store - one app's authoritative state tree
//!
//! A `Store<T>` owns the in-memory document and the slot it is mirrored to.
//! Every successful mutation is followed by a full rewrite of the slot; there
//! is no batching, diffing or versioning.
//!
//! ```text
//! load:    slot → JSON → T           (absent → default, malformed → error)
//! commit:  f(&mut T)? → JSON → slot  (f fails → nothing written)
//! reset:   remove slot, T = default
//! ```

use crate::storage::error::{StorageError, StorageResult};
use crate::storage::slot::SlotStorage;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::rc::Rc;

/// Authoritative state for one app, mirrored to one storage slot
pub struct Store<T> {
    slot: String,
    backend: Rc<dyn SlotStorage>,
    state: T,
}

impl<T> Store<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Load the slot, or start from `default` when it has never been written
    ///
    /// A slot that exists but does not decode is reported as
    /// [`StorageError::Corrupt`] rather than silently replaced.
    pub fn load(
        backend: Rc<dyn SlotStorage>,
        slot: impl Into<String>,
        default: impl FnOnce() -> T,
    ) -> StorageResult<Self> {
        let slot = slot.into();

        let state = match backend.get(&slot)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt {
                slot: slot.clone(),
                reason: e.to_string(),
            })?,
            None => {
                tracing::debug!("Slot '{}' is empty, starting from defaults", slot);
                default()
            }
        };

        Ok(Self {
            slot,
            backend,
            state,
        })
    }

    /// Current state
    pub fn state(&self) -> &T {
        &self.state
    }

    /// Name of the slot this store writes to
    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// Serialize the whole state and overwrite the slot
    pub fn persist(&self) -> StorageResult<()> {
        let raw = serde_json::to_string(&self.state)?;
        self.backend.set(&self.slot, &raw)?;
        tracing::debug!("Persisted slot '{}' ({} bytes)", self.slot, raw.len());
        Ok(())
    }

    /// Apply a mutation and persist it
    ///
    /// When `f` fails nothing is written; `f` must validate before it
    /// touches the state. When persisting fails the in-memory change is kept
    /// and the storage error is returned.
    pub fn commit<R, E>(&mut self, f: impl FnOnce(&mut T) -> Result<R, E>) -> Result<R, E>
    where
        E: From<StorageError>,
    {
        let result = f(&mut self.state)?;
        self.persist()?;
        Ok(result)
    }

    /// Erase the slot and reinitialize the in-memory state
    pub fn reset(&mut self, default: T) -> StorageResult<()> {
        self.backend.remove(&self.slot)?;
        self.state = default;
        tracing::debug!("Reset slot '{}'", self.slot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn backend() -> Rc<MemoryStorage> {
        Rc::new(MemoryStorage::new())
    }

    #[test]
    fn test_load_absent_uses_default() {
        let mem = backend();
        let store: Store<Vec<u32>> = Store::load(mem.clone(), "nums", || vec![7]).unwrap();
        assert_eq!(store.state(), &vec![7]);
        assert_eq!(store.slot(), "nums");
        // Loading alone does not write
        assert!(mem.is_empty());
    }

    #[test]
    fn test_load_malformed_fails_loudly() {
        let mem = backend();
        mem.set("nums", "{not json").unwrap();

        let result: StorageResult<Store<Vec<u32>>> = Store::load(mem.clone(), "nums", Vec::new);
        assert!(matches!(result, Err(StorageError::Corrupt { .. })));

        // The stored value is left for inspection
        assert_eq!(mem.get("nums").unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn test_commit_persists() {
        let mem = backend();
        let mut store: Store<Vec<u32>> = Store::load(mem.clone(), "nums", Vec::new).unwrap();

        let len = store
            .commit(|v| {
                v.push(1);
                v.push(2);
                Ok::<_, StorageError>(v.len())
            })
            .unwrap();
        assert_eq!(len, 2);
        assert_eq!(mem.get("nums").unwrap().as_deref(), Some("[1,2]"));

        let reloaded: Store<Vec<u32>> = Store::load(mem, "nums", Vec::new).unwrap();
        assert_eq!(reloaded.state(), &vec![1, 2]);
    }

    #[test]
    fn test_failed_mutation_writes_nothing() {
        let mem = backend();
        let mut store: Store<Vec<u32>> = Store::load(mem.clone(), "nums", Vec::new).unwrap();

        let result = store.commit(|_| Err::<(), _>(StorageError::Serialization("nope".into())));
        assert!(result.is_err());
        assert_eq!(mem.get("nums").unwrap(), None);
    }

    #[test]
    fn test_persist_failure_keeps_memory_state() {
        let mem = Rc::new(MemoryStorage::with_quota(4));
        let mut store: Store<Vec<u32>> = Store::load(mem.clone(), "nums", Vec::new).unwrap();

        store
            .commit(|v| {
                v.push(1);
                Ok::<_, StorageError>(())
            })
            .unwrap();

        let err = store
            .commit(|v| {
                v.extend([100, 200, 300]);
                Ok::<_, StorageError>(())
            })
            .unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { .. }));

        // Nothing is lost in memory, the slot keeps the last good write
        assert_eq!(store.state(), &vec![1, 100, 200, 300]);
        assert_eq!(mem.get("nums").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_reset() {
        let mem = backend();
        let mut store: Store<Vec<u32>> = Store::load(mem.clone(), "nums", Vec::new).unwrap();
        store
            .commit(|v| {
                v.push(9);
                Ok::<_, StorageError>(())
            })
            .unwrap();

        store.reset(Vec::new()).unwrap();
        assert!(store.state().is_empty());
        assert_eq!(mem.get("nums").unwrap(), None);
    }
}
