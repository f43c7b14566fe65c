/*!
 * Lock Registries
 *
 * Concurrency-safe maps from key to lock, created lazily on first use:
 * - `LockRegistry`: one mutex per key (exclusive access only)
 * - `RwLockRegistry`: one reader-writer lock per key (shared or exclusive)
 *
 * # Architecture
 *
 * Both registries share the same backing strategy: a sharded concurrent
 * map (`DashMap` with an `ahash` hasher) holding `Arc`-wrapped parking_lot
 * primitives. The get-or-create path goes through the map's entry API, so
 * it is atomic with respect to competing creates and removes on the same
 * key: concurrent callers always observe a single shared lock instance.
 *
 * Removal only drops the name-to-lock association. Callers still holding
 * the `Arc` keep a valid lock until the last handle goes away, so removal
 * can never invalidate an in-progress critical section.
 */

mod exclusive;
mod rw;

pub use exclusive::LockRegistry;
pub use rw::RwLockRegistry;
