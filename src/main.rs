/*!
 * Lockbench - Main Entry Point
 *
 * Benchmark driver that runs the workload harness against each locking
 * strategy and reports elapsed wall-clock time per strategy.
 *
 * Configuration via environment:
 * - LOCKBENCH_WORKERS       worker thread count (default 4)
 * - LOCKBENCH_ITERATIONS    passes over the pool per worker (default 200)
 * - LOCKBENCH_OBJECTS       stateful objects in the pool (default 1000)
 * - LOCKBENCH_WRITE_RATIO   write probability in [0, 1] (default 0.25)
 * - LOCKBENCH_JSON          emit per-strategy JSON reports when set to 1
 */

use named_locks::harness::workload;
use named_locks::{Strategy, WorkloadConfig};
use std::error::Error;
use std::str::FromStr;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize structured tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let defaults = WorkloadConfig::default();
    let config = WorkloadConfig {
        workers: env_or("LOCKBENCH_WORKERS", defaults.workers),
        iterations: env_or("LOCKBENCH_ITERATIONS", defaults.iterations),
        objects: env_or("LOCKBENCH_OBJECTS", defaults.objects),
        write_ratio: env_or("LOCKBENCH_WRITE_RATIO", defaults.write_ratio),
    };
    let emit_json = env_or("LOCKBENCH_JSON", 0u8) == 1;

    info!(
        workers = config.workers,
        iterations = config.iterations,
        objects = config.objects,
        write_ratio = config.write_ratio,
        "lockbench starting"
    );

    for strategy in [Strategy::GlobalLock, Strategy::NamedLock, Strategy::NamedRwLock] {
        info!(?strategy, "beginning strategy");
        let report = workload::run(&config, strategy)?;
        info!(
            ?strategy,
            elapsed_ms = report.elapsed_ms,
            ops = report.ops,
            "completed strategy"
        );
        if emit_json {
            println!("{}", serde_json::to_string(&report)?);
        }
    }

    Ok(())
}
