//! Optional timing hooks callers can wrap around network operations.
//!
//! Nothing in the neural core calls these on its own. Results are identical
//! with or without a hook attached.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Operation being measured
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Generate,
    Fire,
    Mutate,
    Crossover,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::Generate => "generate",
            Operation::Fire => "fire",
            Operation::Mutate => "mutate",
            Operation::Crossover => "crossover",
        };
        f.write_str(name)
    }
}

/// Sink for operation timings
pub trait Instrument: Sync {
    fn record(&self, op: Operation, elapsed: Duration);
}

/// Run `f`, reporting its duration to `hook` when one is given.
#[inline]
pub fn timed<T>(hook: Option<&dyn Instrument>, op: Operation, f: impl FnOnce() -> T) -> T {
    match hook {
        None => f(),
        Some(hook) => {
            let start = Instant::now();
            let result = f();
            hook.record(op, start.elapsed());
            result
        }
    }
}

/// Writes every timing to the `log` facade at trace level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogInstrument;

impl Instrument for LogInstrument {
    fn record(&self, op: Operation, elapsed: Duration) {
        log::trace!("{} time: {}nanos", op, elapsed.as_nanos());
    }
}

/// Accumulates call counts and total time per operation.
#[derive(Debug, Default)]
pub struct TimingStats {
    counts: [AtomicU64; 4],
    nanos: [AtomicU64; 4],
}

impl TimingStats {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(op: Operation) -> usize {
        match op {
            Operation::Generate => 0,
            Operation::Fire => 1,
            Operation::Mutate => 2,
            Operation::Crossover => 3,
        }
    }

    pub fn count(&self, op: Operation) -> u64 {
        self.counts[Self::slot(op)].load(Ordering::Relaxed)
    }

    pub fn total(&self, op: Operation) -> Duration {
        Duration::from_nanos(self.nanos[Self::slot(op)].load(Ordering::Relaxed))
    }

    /// Mean duration per call, zero when the operation never ran
    pub fn mean(&self, op: Operation) -> Duration {
        match self.count(op) {
            0 => Duration::ZERO,
            n => Duration::from_nanos(self.nanos[Self::slot(op)].load(Ordering::Relaxed) / n),
        }
    }
}

impl Instrument for TimingStats {
    fn record(&self, op: Operation, elapsed: Duration) {
        let slot = Self::slot(op);
        self.counts[slot].fetch_add(1, Ordering::Relaxed);
        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        self.nanos[slot].fetch_add(nanos, Ordering::Relaxed);
    }
}
