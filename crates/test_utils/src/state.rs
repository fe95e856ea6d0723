// Path: crates/test_utils/src/state.rs
//! An in-memory `StateAccess` with explicit commit/rollback, for simulating block
//! boundaries and node restarts.

use aeon_api::state::StateAccess;
use aeon_types::error::StateError;
use std::collections::BTreeMap;

/// An in-memory key-value store.
///
/// Writes go to a pending overlay until [`MemoryState::commit`] is called, which
/// mirrors a host that commits a block's writes atomically. [`MemoryState::rollback`]
/// drops the overlay as an aborted block would.
#[derive(Debug, Clone, Default)]
pub struct MemoryState {
    committed: BTreeMap<Vec<u8>, Vec<u8>>,
    pending: BTreeMap<Vec<u8>, Vec<u8>>,
    fail_writes: bool,
}

impl MemoryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write fail with a backend error.
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Applies all pending writes.
    pub fn commit(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        self.committed.extend(pending);
    }

    /// Discards all pending writes.
    pub fn rollback(&mut self) {
        self.pending.clear();
    }

    /// Simulates a restart: only committed data survives.
    pub fn reopen(&self) -> Self {
        Self {
            committed: self.committed.clone(),
            pending: BTreeMap::new(),
            fail_writes: false,
        }
    }

    /// Number of committed keys.
    pub fn committed_len(&self) -> usize {
        self.committed.len()
    }
}

impl StateAccess for MemoryState {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        Ok(self
            .pending
            .get(key)
            .or_else(|| self.committed.get(key))
            .cloned())
    }

    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError> {
        if self.fail_writes {
            return Err(StateError::Backend("injected write failure".into()));
        }
        self.pending.insert(key.to_vec(), value.to_vec());
        Ok(())
    }
}
