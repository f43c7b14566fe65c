/*!
 * Named Locks Library
 * Per-key mutual exclusion with lazy lock creation and safe removal
 */

pub mod core;
pub mod harness;
pub mod registry;

// Re-exports
pub use crate::core::errors::RegistryError;
pub use crate::harness::{StatefulObject, Strategy, WorkloadConfig, WorkloadReport};
pub use crate::registry::{LockRegistry, RwLockRegistry};
