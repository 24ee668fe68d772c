/*!
 * Semaphore Adapter
 * Counting semaphore exposed through the lock vocabulary
 */

use super::traits::Lock;
use crate::core::errors::{InternalFailure, LockError, LockResult};
use parking_lot::{Condvar, Mutex};
use tracing::{debug, trace};

#[derive(Debug)]
struct SemaphoreState {
    permits: usize,
    removed: bool,
}

/// Counting semaphore
///
/// # Semantics
///
/// - `acquire()` takes one permit, blocking at zero
/// - `tryacquire()` returns `Busy` at zero permits
/// - **Shared locking**: none; read/write variants degrade to `acquire()`
/// - **Ownership**: permits are not owned; any thread may `release()`
/// - **Unmatched release**: adds a permit up to `max_permits`, then fails with
///   `InternalFailure::Overflow`
///
/// With one permit this behaves as a non-recursive mutex.
pub struct SemaphoreLock {
    state: Mutex<SemaphoreState>,
    max_permits: usize,
    available: Condvar,
}

impl SemaphoreLock {
    /// Semaphore with `permits` initially available and the same ceiling
    pub fn new(permits: usize) -> Self {
        Self::with_max(permits, permits)
    }

    /// Binary semaphore, one permit
    pub fn binary() -> Self {
        Self::new(1)
    }

    /// Semaphore with an explicit ceiling for `release()`
    ///
    /// `max_permits` is raised to `permits` if smaller, and is never below
    /// one so a semaphore starting at zero can still be signalled.
    pub fn with_max(permits: usize, max_permits: usize) -> Self {
        Self {
            state: Mutex::new(SemaphoreState {
                permits,
                removed: false,
            }),
            max_permits: max_permits.max(permits).max(1),
            available: Condvar::new(),
        }
    }

    /// Currently available permits
    pub fn permits(&self) -> usize {
        self.state.lock().permits
    }

    pub fn max_permits(&self) -> usize {
        self.max_permits
    }
}

impl Default for SemaphoreLock {
    fn default() -> Self {
        Self::binary()
    }
}

impl Lock for SemaphoreLock {
    fn remove(&self) -> LockResult<()> {
        let mut state = self.state.lock();
        if !state.removed {
            state.removed = true;
            self.available.notify_all();
            debug!(permits = state.permits, "semaphore removed");
        }
        Ok(())
    }

    fn acquire(&self) -> LockResult<()> {
        let mut state = self.state.lock();
        loop {
            if state.removed {
                return Err(InternalFailure::Removed.into());
            }
            if state.permits > 0 {
                state.permits -= 1;
                trace!(permits = state.permits, "semaphore acquired");
                return Ok(());
            }
            self.available.wait(&mut state);
        }
    }

    fn tryacquire(&self) -> LockResult<()> {
        let mut state = self.state.lock();
        if state.removed {
            return Err(InternalFailure::Removed.into());
        }
        if state.permits == 0 {
            return Err(LockError::Busy);
        }
        state.permits -= 1;
        Ok(())
    }

    fn release(&self) -> LockResult<()> {
        let mut state = self.state.lock();
        if state.removed {
            return Err(InternalFailure::Removed.into());
        }
        if state.permits >= self.max_permits {
            return Err(InternalFailure::Overflow.into());
        }
        state.permits += 1;
        self.available.notify_one();
        trace!(permits = state.permits, "semaphore released");
        Ok(())
    }

    fn acquire_read(&self) -> LockResult<()> {
        self.acquire()
    }

    fn acquire_write(&self) -> LockResult<()> {
        self.acquire()
    }

    fn tryacquire_read(&self) -> LockResult<()> {
        self.tryacquire()
    }

    fn tryacquire_write(&self) -> LockResult<()> {
        self.tryacquire()
    }

    fn tryacquire_write_upgrade(&self) -> LockResult<()> {
        self.acquire()
    }

    fn name(&self) -> &'static str {
        "semaphore"
    }
}
