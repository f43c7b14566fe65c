/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Registry and harness errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum RegistryError {
    #[error("Race violation on '{name}': step {step} observed counter {observed}")]
    #[diagnostic(
        code(registry::race_violation),
        help("Two critical sections overlapped on the same key. The lock strategy in use does not provide mutual exclusion.")
    )]
    RaceViolation {
        name: String,
        step: u32,
        observed: i64,
    },

    #[error("Lock acquisition timed out after {timeout_ms}ms")]
    #[diagnostic(
        code(registry::acquisition_timeout),
        help("The key's lock was held by another caller for the full timeout. No lock was acquired, so none is released.")
    )]
    AcquisitionTimeout { timeout_ms: u64 },
}
