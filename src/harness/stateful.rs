/*!
 * Stateful Race Oracle
 * Named object whose mutation is only correct under external mutual exclusion
 */

use crate::core::errors::RegistryError;
use std::sync::atomic::{AtomicI64, Ordering};

/// Number of increment steps per mutation; more steps widen the window in
/// which an overlapping call gets caught.
const STEPS: i64 = 10;

/// Idle sentinel between mutations.
const IDLE: i64 = -1;

/// Uniquely-named object with deliberately unsynchronized state
///
/// `change_state` walks the internal counter through a fixed step sequence
/// and verifies each step. The counter is shared with no locking of its own
/// (relaxed atomics keep the race observable without undefined behavior), so
/// any two overlapping `change_state` calls, or a `change_state` overlapping
/// anything that resets the counter, derail the sequence and surface as a
/// [`RegistryError::RaceViolation`]. That makes it a test oracle for whatever
/// locking strategy wraps it: zero violations under load means the strategy
/// serialized access correctly.
pub struct StatefulObject {
    name: String,
    state: AtomicI64,
}

impl StatefulObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: AtomicI64::new(IDLE),
        }
    }

    /// Unique name identifying this object; doubles as its lock key
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Multi-step mutation, correct only if no other call overlaps it
    ///
    /// Fails with the violated step and the counter value actually observed.
    pub fn change_state(&self) -> Result<(), RegistryError> {
        for step in 0..STEPS {
            let observed = self.state.fetch_add(1, Ordering::Relaxed) + 1;
            if observed != step {
                return Err(RegistryError::RaceViolation {
                    name: self.name.clone(),
                    step: step as u32,
                    observed,
                });
            }
        }
        self.state.store(IDLE, Ordering::Relaxed);
        Ok(())
    }

    /// Read of comparable cost to `change_state`; touches no shared state,
    /// so concurrent reads may safely overlap each other
    pub fn read_state(&self) -> Result<(), RegistryError> {
        let mut local = IDLE;
        for step in 0..STEPS {
            local = std::hint::black_box(local + 1);
            if local != step {
                return Err(RegistryError::RaceViolation {
                    name: self.name.clone(),
                    step: step as u32,
                    observed: local,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_changes_never_violate() {
        let object = StatefulObject::new("seq");
        for _ in 0..1_000 {
            object.change_state().unwrap();
        }
    }

    #[test]
    fn test_reads_never_violate() {
        let object = StatefulObject::new("reader");
        for _ in 0..1_000 {
            object.read_state().unwrap();
        }
    }

    #[test]
    fn test_name_round_trips() {
        let object = StatefulObject::new("object-42");
        assert_eq!(object.name(), "object-42");
    }
}
