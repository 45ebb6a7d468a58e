//! Concurrency Limiter
//!
//! Bounded-permit gate with RAII release.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::warn;

use crate::error::{Result, ServiceError};

// == Concurrency Gate ==
/// Limits how many callers may be inside the gated section at once.
///
/// Waiters are admitted in FIFO order. Cloning the gate shares the same
/// permits and counter.
#[derive(Debug, Clone)]
pub struct ConcurrencyGate {
    /// Permits available to new callers
    semaphore: Arc<Semaphore>,
    /// Callers currently admitted
    in_flight: Arc<AtomicUsize>,
    /// Configured maximum of `in_flight`
    limit: usize,
    /// Longest a caller may wait for a permit, None = wait indefinitely
    acquire_timeout: Option<Duration>,
}

impl ConcurrencyGate {
    // == Constructor ==
    /// Creates a gate admitting at most `limit` callers, waiting indefinitely.
    pub fn new(limit: usize) -> Self {
        Self::with_timeout(limit, None)
    }

    /// Creates a gate that fails with `Overloaded` after waiting `acquire_timeout`.
    ///
    /// `limit` is clamped to `Semaphore::MAX_PERMITS`.
    pub fn with_timeout(limit: usize, acquire_timeout: Option<Duration>) -> Self {
        let limit = limit.min(Semaphore::MAX_PERMITS);
        Self {
            semaphore: Arc::new(Semaphore::new(limit)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            limit,
            acquire_timeout,
        }
    }

    // == Acquire ==
    /// Waits for a free slot and admits the caller.
    ///
    /// The slot is held until the returned [`GatePermit`] is dropped. A
    /// caller whose future is dropped while still waiting never takes a slot.
    ///
    /// # Errors
    /// - `Overloaded` if a timeout is configured and no slot frees up in time
    pub async fn acquire(&self) -> Result<GatePermit> {
        let waiting = self.semaphore.clone().acquire_owned();

        let acquired = match self.acquire_timeout {
            Some(timeout) => tokio::time::timeout(timeout, waiting).await.map_err(|_| {
                warn!(
                    limit = self.limit,
                    timeout_ms = timeout.as_millis() as u64,
                    "Concurrency limit reached, shedding request"
                );
                ServiceError::Overloaded(timeout)
            })?,
            None => waiting.await,
        };

        let permit = acquired
            .map_err(|_| ServiceError::Internal("concurrency gate closed".to_string()))?;

        self.in_flight.fetch_add(1, Ordering::SeqCst);

        Ok(GatePermit {
            in_flight: Arc::clone(&self.in_flight),
            _permit: permit,
        })
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of callers currently admitted.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Number of slots free right now.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}

// == Gate Permit ==
/// Proof of admission. Dropping it releases the slot.
#[derive(Debug)]
pub struct GatePermit {
    in_flight: Arc<AtomicUsize>,
    _permit: OwnedSemaphorePermit,
}

impl Drop for GatePermit {
    fn drop(&mut self) {
        // Runs before the semaphore permit is returned, so the next waiter
        // never observes a stale count.
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
