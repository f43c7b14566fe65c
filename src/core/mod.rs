/*!
 * Core Module
 * Shared error handling
 */

pub mod errors;

// Re-export for convenience
pub use errors::*;
