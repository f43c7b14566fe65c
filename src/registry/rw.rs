/*!
 * Reader-Writer Lock Registry
 * Per-key shared/exclusive locks with atomic get-or-create
 */

use crate::core::errors::RegistryError;
use ahash::RandomState;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

/// Registry mapping keys to reader-writer locks
///
/// Per key, any number of shared (read) sections may overlap; an exclusive
/// (write) section excludes every other section on that key. Queuing policy
/// between waiters is whatever `parking_lot::RwLock` provides.
///
/// Get-or-create and removal follow the same contract as [`LockRegistry`]:
/// creation is atomic, removal drops only the association, and in-flight
/// holders of the `Arc` handle are unaffected.
///
/// [`LockRegistry`]: crate::registry::LockRegistry
pub struct RwLockRegistry<K = String>
where
    K: Eq + Hash + Clone + Debug,
{
    locks: DashMap<K, Arc<RwLock<()>>, RandomState>,
}

impl<K: Eq + Hash + Clone + Debug> RwLockRegistry<K> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            locks: DashMap::with_hasher(RandomState::new()),
        }
    }

    /// Create a registry pre-sized for an expected key count
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            locks: DashMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    /// Get the reader-writer lock for `key`, creating it on first use
    pub fn get(&self, key: &K) -> Arc<RwLock<()>> {
        if let Some(existing) = self.locks.get(key) {
            return Arc::clone(existing.value());
        }

        let entry = self.locks.entry(key.clone()).or_insert_with(|| {
            tracing::trace!(key = ?key, "created reader-writer lock");
            Arc::new(RwLock::new(()))
        });
        Arc::clone(entry.value())
    }

    /// Run `body` while holding the key's lock in shared mode
    ///
    /// Concurrent readers of the same key proceed simultaneously. Released
    /// on every exit path; `body`'s result propagates unchanged.
    pub fn with_read<R>(&self, key: &K, body: impl FnOnce() -> R) -> R {
        let lock = self.get(key);
        let _guard = lock.read();
        body()
    }

    /// Run `body` while holding the key's lock in exclusive mode
    ///
    /// Excludes all other readers and writers of the same key. Released on
    /// every exit path; `body`'s result propagates unchanged.
    pub fn with_write<R>(&self, key: &K, body: impl FnOnce() -> R) -> R {
        let lock = self.get(key);
        let _guard = lock.write();
        body()
    }

    /// Shared-mode `with_read`, waiting at most `timeout` for entry
    pub fn try_with_read<R>(
        &self,
        key: &K,
        timeout: Duration,
        body: impl FnOnce() -> R,
    ) -> Result<R, RegistryError> {
        let lock = self.get(key);
        let result = match lock.try_read_for(timeout) {
            Some(_guard) => Ok(body()),
            None => Err(RegistryError::AcquisitionTimeout {
                timeout_ms: timeout.as_millis() as u64,
            }),
        };
        result
    }

    /// Exclusive-mode `with_write`, waiting at most `timeout` for entry
    pub fn try_with_write<R>(
        &self,
        key: &K,
        timeout: Duration,
        body: impl FnOnce() -> R,
    ) -> Result<R, RegistryError> {
        let lock = self.get(key);
        let result = match lock.try_write_for(timeout) {
            Some(_guard) => Ok(body()),
            None => Err(RegistryError::AcquisitionTimeout {
                timeout_ms: timeout.as_millis() as u64,
            }),
        };
        result
    }

    /// Drop the key's association; silent no-op when absent
    pub fn remove(&self, key: &K) {
        if self.locks.remove(key).is_some() {
            tracing::trace!(key = ?key, "removed reader-writer lock");
        }
    }

    /// Check if a lock currently exists for `key`
    pub fn contains(&self, key: &K) -> bool {
        self.locks.contains_key(key)
    }

    /// Number of registered keys
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Check if no keys are registered
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

impl<K: Eq + Hash + Clone + Debug> Default for RwLockRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}
