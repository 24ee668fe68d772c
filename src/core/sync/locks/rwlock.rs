/*!
 * Read-Write Lock Adapter
 * Shared readers, exclusive writer, in-place upgrade
 */

use super::traits::{ExclusiveLock, Lock};
use crate::core::errors::{InternalFailure, LockError, LockResult};
use parking_lot::{Condvar, Mutex};
use tracing::{debug, trace};

#[derive(Debug, Default)]
struct RwState {
    readers: usize,
    writer: bool,
    waiting_writers: usize,
    removed: bool,
}

impl RwState {
    #[inline]
    fn check(&self) -> LockResult<()> {
        if self.removed {
            Err(InternalFailure::Removed.into())
        } else {
            Ok(())
        }
    }
}

/// Read-write lock with native shared mode
///
/// # Semantics
///
/// - `acquire()` and `acquire_write()` take the exclusive side
/// - New readers wait while a writer is queued, so writers are not starved
/// - **Reentrancy**: none. A reader calling `acquire_write()` deadlocks;
///   use `tryacquire_write_upgrade()` instead
/// - **Upgrade**: succeeds only for the sole reader; `Busy` while other
///   readers hold the lock, `NotReadHeld` when no reader exists. Treat any
///   `Err` as "not upgraded"; the variant is diagnostic only
/// - **Upgrade ownership**: read holds are counted, not owned. Through the
///   raw `Lock` API a thread holding nothing can upgrade another thread's
///   sole read hold. `WriteGuard::try_upgrade` consumes a `ReadGuard` and
///   cannot be misused this way
/// - **Unmatched release**: `InternalFailure::NotHeld`
///
/// `release()` drops a write hold if one exists, otherwise one read hold.
pub struct RwLockAdapter {
    state: Mutex<RwState>,
    readers_cv: Condvar,
    writers_cv: Condvar,
}

impl RwLockAdapter {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RwState::default()),
            readers_cv: Condvar::new(),
            writers_cv: Condvar::new(),
        }
    }

    /// Current number of read holds (diagnostics only)
    pub fn readers(&self) -> usize {
        self.state.lock().readers
    }

    /// Whether a write hold exists (diagnostics only)
    pub fn is_write_held(&self) -> bool {
        self.state.lock().writer
    }
}

impl Default for RwLockAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl Lock for RwLockAdapter {
    fn remove(&self) -> LockResult<()> {
        let mut state = self.state.lock();
        if !state.removed {
            state.removed = true;
            self.readers_cv.notify_all();
            self.writers_cv.notify_all();
            debug!("rwlock removed");
        }
        Ok(())
    }

    fn acquire(&self) -> LockResult<()> {
        self.acquire_write()
    }

    fn tryacquire(&self) -> LockResult<()> {
        self.tryacquire_write()
    }

    fn release(&self) -> LockResult<()> {
        let mut state = self.state.lock();
        state.check()?;
        if state.writer {
            state.writer = false;
            trace!("rwlock write released");
        } else if state.readers > 0 {
            state.readers -= 1;
            trace!(readers = state.readers, "rwlock read released");
        } else {
            return Err(InternalFailure::NotHeld.into());
        }

        if state.readers == 0 && state.waiting_writers > 0 {
            self.writers_cv.notify_one();
        } else if !state.writer {
            self.readers_cv.notify_all();
        }
        Ok(())
    }

    fn acquire_read(&self) -> LockResult<()> {
        let mut state = self.state.lock();
        loop {
            state.check()?;
            if !state.writer && state.waiting_writers == 0 {
                state.readers += 1;
                return Ok(());
            }
            self.readers_cv.wait(&mut state);
        }
    }

    fn acquire_write(&self) -> LockResult<()> {
        let mut state = self.state.lock();
        state.waiting_writers += 1;
        let result = loop {
            if let Err(err) = state.check() {
                break Err(err);
            }
            if !state.writer && state.readers == 0 {
                state.writer = true;
                break Ok(());
            }
            self.writers_cv.wait(&mut state);
        };
        state.waiting_writers -= 1;
        if result.is_err() && state.waiting_writers == 0 {
            self.readers_cv.notify_all();
        }
        result
    }

    fn tryacquire_read(&self) -> LockResult<()> {
        let mut state = self.state.lock();
        state.check()?;
        if state.writer || state.waiting_writers > 0 {
            return Err(LockError::Busy);
        }
        state.readers += 1;
        Ok(())
    }

    fn tryacquire_write(&self) -> LockResult<()> {
        let mut state = self.state.lock();
        state.check()?;
        if state.writer || state.readers > 0 {
            return Err(LockError::Busy);
        }
        state.writer = true;
        Ok(())
    }

    fn tryacquire_write_upgrade(&self) -> LockResult<()> {
        let mut state = self.state.lock();
        state.check()?;
        match state.readers {
            0 => Err(InternalFailure::NotReadHeld.into()),
            1 if !state.writer => {
                // Swap the read hold for the write hold under one state lock
                state.readers = 0;
                state.writer = true;
                trace!("rwlock upgraded");
                Ok(())
            }
            _ => Err(LockError::Busy),
        }
    }

    fn name(&self) -> &'static str {
        "rw_lock"
    }
}

// SAFETY: holds are tracked under one state mutex; every acquire path
// refuses while a conflicting hold exists, the holder included.
unsafe impl ExclusiveLock for RwLockAdapter {}
