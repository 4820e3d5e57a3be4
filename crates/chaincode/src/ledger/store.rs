//! [`StateStore`]: the ledger state collaborator, and an in-memory implementation.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock, RwLockReadGuard},
};

use bytes::Bytes;
use thiserror::Error;

/// Errors reported by a state store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// The store could not be reached or is in a broken state.
    #[error("ledger unavailable: {0}")]
    Unavailable(String),

    /// The store refused the operation.
    #[error("ledger rejected operation: {0}")]
    Rejected(String),
}

/// Key-value view of the ledger supplied by the host for one invocation.
///
/// Concurrency control across transactions is the implementor's concern.
#[cfg_attr(test, mockall::automock)]
pub trait StateStore {
    /// Read the value for `key`; `Ok(None)` when the key has never been written.
    fn get_state(&self, key: &str) -> Result<Option<Bytes>, LedgerError>;

    /// Write (or overwrite) the value for `key`.
    fn put_state(&self, key: &str, value: Bytes) -> Result<(), LedgerError>;
}

/// Thread-safe in-memory ledger used by the development host and in tests.
///
/// Clones share the same underlying map.
#[derive(Clone, Debug, Default)]
pub struct MemoryLedger {
    inner: Arc<RwLock<HashMap<String, Bytes>>>,
}

impl MemoryLedger {
    /// Create a new, empty [`MemoryLedger`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Unavailable`] if the state lock is poisoned.
    pub fn len(&self) -> Result<usize, LedgerError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, LedgerError> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, Bytes>>, LedgerError> {
        self.inner
            .read()
            .map_err(|_| LedgerError::Unavailable("state lock poisoned".into()))
    }
}

impl StateStore for MemoryLedger {
    fn get_state(&self, key: &str) -> Result<Option<Bytes>, LedgerError> {
        Ok(self.read()?.get(key).cloned())
    }

    fn put_state(&self, key: &str, value: Bytes) -> Result<(), LedgerError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| LedgerError::Unavailable("state lock poisoned".into()))?;
        map.insert(key.to_owned(), value);
        Ok(())
    }
}
