// src/core/registry.rs

//! The concurrency-safe store mapping connection identifiers to connectors.

use crate::core::connector::Connector;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Owns the `{connection id -> connector}` map for all live sessions.
///
/// A single mutex guards the map, and it is held only for the duration of a
/// map operation. Connector `close()` calls always happen after the lock is
/// released, so a slow or blocking close cannot stall unrelated registry
/// traffic. At most one connector is live per identifier at any observable
/// instant under the lock.
#[derive(Default)]
pub struct ConnectionRegistry {
    connectors: Mutex<HashMap<u32, Arc<dyn Connector>>>,
}

impl std::fmt::Debug for ConnectionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionRegistry")
            .field("count", &self.count())
            .finish()
    }
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connectors: Mutex::new(HashMap::new()),
        }
    }

    /// Atomically swaps `connector` in under `id` and returns the previous
    /// occupant, if any.
    ///
    /// This is the replace-then-evict policy: the new entry is visible in the
    /// map before the old occupant is closed. The caller must close the
    /// returned connector itself, outside this call, so the close never runs
    /// under the registry lock.
    pub fn register(
        &self,
        id: u32,
        connector: Arc<dyn Connector>,
    ) -> Option<Arc<dyn Connector>> {
        self.connectors.lock().insert(id, connector)
    }

    /// O(1) lookup under the lock. Never blocks on connector state.
    pub fn lookup(&self, id: u32) -> Option<Arc<dyn Connector>> {
        self.connectors.lock().get(&id).cloned()
    }

    /// Atomically deletes and returns the occupant, if any. As with
    /// `register`, the caller closes the returned connector outside the lock.
    pub fn remove(&self, id: u32) -> Option<Arc<dyn Connector>> {
        self.connectors.lock().remove(&id)
    }

    /// A defensive copy of the map, safe to iterate without holding the
    /// registry lock. Used for administrative enumeration and diagnostics.
    pub fn snapshot(&self) -> HashMap<u32, Arc<dyn Connector>> {
        self.connectors.lock().clone()
    }

    /// Current number of live entries.
    pub fn count(&self) -> usize {
        self.connectors.lock().len()
    }
}
