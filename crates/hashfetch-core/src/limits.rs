//! Parallelism limits.
//!
//! The upper bound on `--parallel` is derived from the host CPU count; the
//! scheduler itself only ever sees a [`MaxConcurrent`], which cannot be zero.

use std::fmt;
use std::num::NonZeroUsize;

/// Concurrent requests allowed per available CPU.
pub const REQUESTS_PER_CPU: usize = 8;

/// Source of the host CPU count, injectable for tests.
pub trait CpuCount {
    fn cpu_count(&self) -> usize;
}

/// Reads the CPU count from the running host.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostCpus;

impl CpuCount for HostCpus {
    fn cpu_count(&self) -> usize {
        std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1)
    }
}

/// Approximate maximum useful parallelism on this host.
pub fn max_parallel() -> usize {
    max_parallel_from(&HostCpus)
}

pub fn max_parallel_from(cpus: &impl CpuCount) -> usize {
    cpus.cpu_count().max(1) * REQUESTS_PER_CPU
}

/// Maximum number of fetch units in flight at once. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MaxConcurrent(NonZeroUsize);

impl MaxConcurrent {
    /// Returns `None` for 0.
    pub fn new(n: usize) -> Option<Self> {
        NonZeroUsize::new(n).map(Self)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }

    /// Lowers the budget to `n`, never below 1.
    pub fn at_most(self, n: usize) -> Self {
        match NonZeroUsize::new(n) {
            Some(n) if n < self.0 => Self(n),
            _ => self,
        }
    }
}

impl From<NonZeroUsize> for MaxConcurrent {
    fn from(n: NonZeroUsize) -> Self {
        Self(n)
    }
}

impl fmt::Display for MaxConcurrent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
