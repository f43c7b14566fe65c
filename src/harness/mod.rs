/*!
 * Correctness Harness
 *
 * Load-generation scaffolding that empirically checks the registries'
 * mutual-exclusion guarantees:
 * - `StatefulObject`: a named object whose multi-step mutation trips a
 *   detectable invariant violation whenever two calls overlap
 * - `workload`: a multi-threaded driver that hammers a pool of stateful
 *   objects through a chosen locking strategy and reports elapsed time
 *
 * The harness never provides synchronization of its own. A race violation
 * surfacing here means the strategy under test failed to serialize access.
 */

mod stateful;
pub mod workload;

pub use stateful::StatefulObject;
pub use workload::{Strategy, WorkloadConfig, WorkloadReport};
