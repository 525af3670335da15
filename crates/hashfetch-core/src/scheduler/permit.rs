//! Permit pool bounding concurrent fetch units.
//!
//! A unit holds one [`Permit`] for its whole life; dropping the permit (on
//! return, error, or unwind) hands the slot to the next waiting unit.

use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::limits::MaxConcurrent;

/// Counting pool of `capacity` admission permits, capped at `Semaphore::MAX_PERMITS`.
#[derive(Debug, Clone)]
pub struct PermitPool {
    capacity: usize,
    semaphore: Arc<Semaphore>,
}

/// One admission slot. Released on drop.
#[derive(Debug)]
pub struct Permit {
    _inner: OwnedSemaphorePermit,
}

impl PermitPool {
    pub fn new(capacity: MaxConcurrent) -> Self {
        let capacity = capacity.get().min(Semaphore::MAX_PERMITS);
        Self {
            capacity,
            semaphore: Arc::new(Semaphore::new(capacity)),
        }
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Permits currently free.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Permits currently held by units.
    pub fn in_use(&self) -> usize {
        self.capacity.saturating_sub(self.available())
    }

    /// Waits until a permit is free. Returns `None` only if the pool was closed,
    /// which this crate never does.
    pub async fn acquire(&self) -> Option<Permit> {
        Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .ok()
            .map(|p| Permit { _inner: p })
    }

    /// Takes a permit if one is free right now.
    #[cfg(test)]
    pub(crate) fn try_acquire(&self) -> Option<Permit> {
        Arc::clone(&self.semaphore)
            .try_acquire_owned()
            .ok()
            .map(|p| Permit { _inner: p })
    }
}
