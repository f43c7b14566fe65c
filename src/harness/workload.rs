/*!
 * Workload Driver
 * Multi-threaded load generator comparing named-lock strategies
 */

use crate::core::errors::RegistryError;
use crate::harness::StatefulObject;
use crate::registry::{LockRegistry, RwLockRegistry};
use parking_lot::Mutex;
use rand::Rng;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

/// Locking strategy routing every object access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// One mutex for the entire pool; the fully-serialized baseline
    GlobalLock,
    /// One exclusive lock per object name via [`LockRegistry`]
    NamedLock,
    /// One reader-writer lock per object name via [`RwLockRegistry`];
    /// reads enter in shared mode, writes in exclusive mode
    NamedRwLock,
}

/// Workload shape
#[derive(Debug, Clone, Copy, Serialize)]
pub struct WorkloadConfig {
    /// Parallel worker threads
    pub workers: usize,
    /// Full passes over the object pool per worker
    pub iterations: usize,
    /// Uniquely-named stateful objects in the pool
    pub objects: usize,
    /// Probability in [0, 1] that a given access is a write
    pub write_ratio: f64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            iterations: 200,
            objects: 1000,
            write_ratio: 0.25,
        }
    }
}

/// Outcome of a completed workload
#[derive(Debug, Clone, Serialize)]
pub struct WorkloadReport {
    pub strategy: Strategy,
    pub elapsed_ms: u64,
    pub ops: u64,
}

struct Strategies {
    global: Mutex<()>,
    named: LockRegistry<String>,
    rw: RwLockRegistry<String>,
}

/// Run `config.workers` threads against a shared pool of stateful objects,
/// routing every access through `strategy`
///
/// Each access picks read vs write by `config.write_ratio`. The first
/// detected [`RegistryError::RaceViolation`] stops all workers and is
/// returned; on success the report carries total operations and elapsed
/// wall-clock milliseconds.
pub fn run(config: &WorkloadConfig, strategy: Strategy) -> Result<WorkloadReport, RegistryError> {
    let objects: Arc<Vec<StatefulObject>> = Arc::new(
        (0..config.objects)
            .map(|i| StatefulObject::new(format!("object-{i}")))
            .collect(),
    );
    let strategies = Arc::new(Strategies {
        global: Mutex::new(()),
        named: LockRegistry::with_capacity(config.objects),
        rw: RwLockRegistry::with_capacity(config.objects),
    });
    let stop = Arc::new(AtomicBool::new(false));

    tracing::debug!(
        ?strategy,
        workers = config.workers,
        iterations = config.iterations,
        objects = config.objects,
        write_ratio = config.write_ratio,
        "starting workload"
    );

    let start = Instant::now();
    let mut handles = Vec::with_capacity(config.workers);
    for _ in 0..config.workers {
        let objects = Arc::clone(&objects);
        let strategies = Arc::clone(&strategies);
        let stop = Arc::clone(&stop);
        let config = *config;

        handles.push(thread::spawn(move || {
            let result = worker(&config, strategy, &objects, &strategies, &stop);
            if result.is_err() {
                stop.store(true, Ordering::Relaxed);
            }
            result
        }));
    }

    let mut ops = 0u64;
    let mut first_error = None;
    for handle in handles {
        match handle.join().expect("worker thread panicked") {
            Ok(count) => ops += count,
            Err(err) => {
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }
    }

    if let Some(err) = first_error {
        tracing::error!(error = %err, ?strategy, "workload aborted on race violation");
        return Err(err);
    }

    let report = WorkloadReport {
        strategy,
        elapsed_ms: start.elapsed().as_millis() as u64,
        ops,
    };
    tracing::debug!(elapsed_ms = report.elapsed_ms, ops = report.ops, "workload complete");
    Ok(report)
}

fn worker(
    config: &WorkloadConfig,
    strategy: Strategy,
    objects: &[StatefulObject],
    strategies: &Strategies,
    stop: &AtomicBool,
) -> Result<u64, RegistryError> {
    let mut rng = rand::thread_rng();
    let mut ops = 0u64;

    for _ in 0..config.iterations {
        if stop.load(Ordering::Relaxed) {
            break;
        }
        for object in objects {
            let write = rng.gen::<f64>() < config.write_ratio;
            match strategy {
                Strategy::GlobalLock => {
                    let _guard = strategies.global.lock();
                    access(object, write)?;
                }
                Strategy::NamedLock => {
                    let key = object.name().to_owned();
                    strategies.named.with_lock(&key, || access(object, write))?;
                }
                Strategy::NamedRwLock => {
                    let key = object.name().to_owned();
                    if write {
                        strategies.rw.with_write(&key, || object.change_state())?;
                    } else {
                        strategies.rw.with_read(&key, || object.read_state())?;
                    }
                }
            }
            ops += 1;
        }
    }
    Ok(ops)
}

fn access(object: &StatefulObject, write: bool) -> Result<(), RegistryError> {
    if write {
        object.change_state()
    } else {
        object.read_state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> WorkloadConfig {
        WorkloadConfig {
            workers: 2,
            iterations: 3,
            objects: 16,
            write_ratio: 0.5,
        }
    }

    #[test]
    fn test_all_strategies_complete_cleanly() {
        for strategy in [Strategy::GlobalLock, Strategy::NamedLock, Strategy::NamedRwLock] {
            let report = run(&small_config(), strategy).unwrap();
            assert_eq!(report.strategy, strategy);
            assert_eq!(report.ops, 2 * 3 * 16);
        }
    }

    #[test]
    fn test_report_serializes() {
        let report = run(&small_config(), Strategy::NamedLock).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("named_lock"));
    }
}
