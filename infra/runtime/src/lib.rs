//! # Runtime
//!
//! Builds the [Tokio](https://tokio.rs) runtime used by the service binaries.
//!
//! PNG rasterisation runs on the blocking pool, so besides the async worker threads every
//! profile also bounds the number of blocking threads a burst of requests can spawn.
//!
//! ## Profiles
//! * **High Performance**: server-side processing, larger stacks, longer keep-alive.
//! * **Memory Efficient**: small footprint for constrained hosts.
//!
//! ## Example
//!
//! ```rust,ignore
//! #[qrgen_runtime::main(high_performance)]
//! async fn main() -> anyhow::Result<()> {
//!     Ok(())
//! }
//! ```

pub use anyhow::Result;
pub use qrgen_derive::main;

use anyhow::anyhow;
use std::{sync::OnceLock, thread::available_parallelism, time::Duration};
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

/// Fallback worker count when parallelism cannot be detected.
const DEFAULT_WORKER_THREADS: usize = 4;
/// Default stack size for threads (3 `MiB`).
const DEFAULT_STACK_SIZE: usize = 3 * 1024 * 1024;
const MIN_STACK_SIZE: usize = 1024 * 1024;
const MAX_STACK_SIZE: usize = 16 * 1024 * 1024;
/// Blocking threads per worker thread.
const BLOCKING_PER_WORKER: usize = 4;
const MAX_BLOCKING_THREADS: usize = 512;
const DEFAULT_THREAD_NAME: &str = "qrgen-worker";

static WORKER_THREADS: OnceLock<usize> = OnceLock::new();

/// Worker thread count from `TOKIO_WORKER_THREADS`, or the available parallelism.
fn detect_worker_threads() -> usize {
    *WORKER_THREADS.get_or_init(|| {
        std::env::var("TOKIO_WORKER_THREADS")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|&n| n > 0 && n <= 1024)
            .unwrap_or_else(|| {
                available_parallelism().map(std::num::NonZero::get).unwrap_or(DEFAULT_WORKER_THREADS)
            })
    })
}

/// Configuration for the Tokio runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub worker_threads: usize,
    pub max_blocking_threads: usize,
    pub stack_size: usize,
    pub thread_name: String,
    pub thread_keep_alive: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        let workers = detect_worker_threads();
        Self {
            worker_threads: workers,
            max_blocking_threads: blocking_for(workers),
            stack_size: DEFAULT_STACK_SIZE,
            thread_name: DEFAULT_THREAD_NAME.to_owned(),
            thread_keep_alive: Duration::from_secs(60),
        }
    }
}

impl RuntimeConfig {
    /// Preset for the HTTP server.
    #[must_use]
    pub fn high_performance() -> Self {
        let workers = detect_worker_threads();
        Self {
            worker_threads: workers,
            max_blocking_threads: blocking_for(workers) * 2,
            stack_size: 4 * 1024 * 1024,
            thread_name: "qrgen-hp".to_owned(),
            thread_keep_alive: Duration::from_secs(300),
        }
    }

    /// Preset for hosts where memory footprint matters.
    #[must_use]
    pub fn memory_efficient() -> Self {
        let workers = (detect_worker_threads() / 2).max(1);
        Self {
            worker_threads: workers,
            max_blocking_threads: workers,
            stack_size: 2 * 1024 * 1024,
            thread_name: "qrgen-mem".to_owned(),
            thread_keep_alive: Duration::from_secs(30),
        }
    }

    #[must_use]
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads.clamp(1, 1024);
        self
    }

    #[must_use]
    pub fn with_max_blocking_threads(mut self, threads: usize) -> Self {
        self.max_blocking_threads = threads.clamp(1, MAX_BLOCKING_THREADS);
        self
    }

    #[must_use]
    pub fn with_stack_size(mut self, size: usize) -> Self {
        self.stack_size = size.clamp(MIN_STACK_SIZE, MAX_STACK_SIZE);
        self
    }

    #[must_use]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.thread_name = if name.trim().is_empty() { DEFAULT_THREAD_NAME.to_owned() } else { name };
        self
    }

    #[must_use]
    pub const fn with_thread_keep_alive(mut self, keep_alive: Duration) -> Self {
        self.thread_keep_alive = keep_alive;
        self
    }

    /// Returns a copy with every field forced into its supported range.
    #[must_use]
    pub fn normalized(&self) -> Self {
        self.clone()
            .with_worker_threads(self.worker_threads)
            .with_max_blocking_threads(self.max_blocking_threads)
            .with_stack_size(self.stack_size)
            .with_thread_name(self.thread_name.clone())
    }
}

fn blocking_for(workers: usize) -> usize {
    workers.saturating_mul(BLOCKING_PER_WORKER).clamp(1, MAX_BLOCKING_THREADS)
}

/// Creates a multithreaded Tokio runtime from `config`.
///
/// Out-of-range settings are clamped (see [`RuntimeConfig::normalized`]); I/O and timers are enabled.
///
/// # Errors
///
/// Returns an error if the OS refuses to create the runtime threads.
///
/// # Examples
///
/// ```rust
/// use qrgen_runtime::{build_runtime_with_config, RuntimeConfig};
///
/// let config = RuntimeConfig::memory_efficient().with_worker_threads(1);
/// let runtime = build_runtime_with_config(&config)?;
/// assert_eq!(runtime.block_on(async { 2 + 2 }), 4);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn build_runtime_with_config(config: &RuntimeConfig) -> Result<Runtime> {
    let config = config.normalized();
    debug!(config = ?config, "Building tokio runtime");

    Builder::new_multi_thread()
        .worker_threads(config.worker_threads)
        .max_blocking_threads(config.max_blocking_threads)
        .thread_name(&config.thread_name)
        .thread_stack_size(config.stack_size)
        .thread_keep_alive(config.thread_keep_alive)
        .enable_all()
        .build()
        .map_err(|e| anyhow!("Failed to initialize runtime: {e}"))
}
