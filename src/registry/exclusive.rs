/*!
 * Exclusive Lock Registry
 * Lazily-created per-key mutexes with atomic get-or-create
 */

use crate::core::errors::RegistryError;
use ahash::RandomState;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

/// Registry mapping keys to exclusive locks
///
/// # Concurrency
///
/// - Get-or-create is atomic: N concurrent `get` calls for the same key all
///   return handles to one lock instance, and exactly one is ever created.
/// - Map access is bounded: `get` and `remove` contend only on the backing
///   shard, never on user critical sections.
/// - Keys are independent: holding one key's lock never blocks another key.
///
/// # Example
///
/// ```
/// use named_locks::LockRegistry;
///
/// let registry = LockRegistry::new();
/// let hits = registry.with_lock(&"account-7".to_string(), || 1 + 1);
/// assert_eq!(hits, 2);
/// ```
pub struct LockRegistry<K = String>
where
    K: Eq + Hash + Clone + Debug,
{
    locks: DashMap<K, Arc<Mutex<()>>, RandomState>,
}

impl<K: Eq + Hash + Clone + Debug> LockRegistry<K> {
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

    /// Get the lock for `key`, creating it on first use
    ///
    /// The returned `Arc` stays valid after `remove`: removal discards the
    /// association, not the lock object itself.
    pub fn get(&self, key: &K) -> Arc<Mutex<()>> {
        // Fast path: no key clone, shard read lock only
        if let Some(existing) = self.locks.get(key) {
            return Arc::clone(existing.value());
        }

        // Slow path: entry API makes insert-if-absent atomic against
        // competing creates and removes on this key
        let entry = self.locks.entry(key.clone()).or_insert_with(|| {
            tracing::trace!(key = ?key, "created exclusive lock");
            Arc::new(Mutex::new(()))
        });
        Arc::clone(entry.value())
    }

    /// Run `body` while holding the key's lock
    ///
    /// The lock is released on every exit path, including unwinding, and
    /// `body`'s result propagates unchanged.
    pub fn with_lock<R>(&self, key: &K, body: impl FnOnce() -> R) -> R {
        let lock = self.get(key);
        let _guard = lock.lock();
        body()
    }

    /// Run `body` under the key's lock, waiting at most `timeout`
    ///
    /// On timeout no lock was acquired, so none is released.
    pub fn try_with_lock<R>(
        &self,
        key: &K,
        timeout: Duration,
        body: impl FnOnce() -> R,
    ) -> Result<R, RegistryError> {
        let lock = self.get(key);
        let result = match lock.try_lock_for(timeout) {
            Some(_guard) => Ok(body()),
            None => Err(RegistryError::AcquisitionTimeout {
                timeout_ms: timeout.as_millis() as u64,
            }),
        };
        result
    }

    /// Drop the key's association; silent no-op when absent
    ///
    /// Holders of a previously returned `Arc` are unaffected. A later `get`
    /// for the same key creates a fresh lock.
    pub fn remove(&self, key: &K) {
        if self.locks.remove(key).is_some() {
            tracing::trace!(key = ?key, "removed exclusive lock");
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

impl<K: Eq + Hash + Clone + Debug> Default for LockRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}
