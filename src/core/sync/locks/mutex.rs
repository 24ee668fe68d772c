/*!
 * Mutex Adapter
 * Non-recursive exclusive lock without shared mode
 */

use super::traits::{ExclusiveLock, Lock};
use crate::core::errors::{InternalFailure, LockError, LockResult};
use parking_lot::{Condvar, Mutex};
use tracing::{debug, trace};

#[derive(Debug, Default)]
struct MutexState {
    held: bool,
    removed: bool,
}

/// Exclusive, non-recursive mutex
///
/// # Semantics
///
/// - **Shared locking**: none; read/write variants degrade to `acquire()`
/// - **Reentrancy**: none. `tryacquire()` by the current holder returns
///   `Busy`; a blocking `acquire()` by the holder never returns
/// - **Unmatched release**: `InternalFailure::NotHeld`, state unchanged
/// - **Ownership**: not tracked; any thread may release a held mutex
pub struct MutexLock {
    state: Mutex<MutexState>,
    available: Condvar,
}

impl MutexLock {
    /// Create an unlocked mutex
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MutexState::default()),
            available: Condvar::new(),
        }
    }

    /// Whether some holder currently owns the mutex (diagnostics only)
    pub fn is_held(&self) -> bool {
        self.state.lock().held
    }
}

impl Default for MutexLock {
    fn default() -> Self {
        Self::new()
    }
}

impl Lock for MutexLock {
    fn remove(&self) -> LockResult<()> {
        let mut state = self.state.lock();
        if !state.removed {
            state.removed = true;
            self.available.notify_all();
            debug!("mutex removed");
        }
        Ok(())
    }

    fn acquire(&self) -> LockResult<()> {
        let mut state = self.state.lock();
        loop {
            if state.removed {
                return Err(InternalFailure::Removed.into());
            }
            if !state.held {
                state.held = true;
                trace!("mutex acquired");
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
        if state.held {
            return Err(LockError::Busy);
        }
        state.held = true;
        Ok(())
    }

    fn release(&self) -> LockResult<()> {
        let mut state = self.state.lock();
        if state.removed {
            return Err(InternalFailure::Removed.into());
        }
        if !state.held {
            return Err(InternalFailure::NotHeld.into());
        }
        state.held = false;
        self.available.notify_one();
        trace!("mutex released");
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
        "mutex"
    }
}

// SAFETY: holds are tracked under one state mutex; every acquire path
// refuses while a conflicting hold exists, the holder included.
unsafe impl ExclusiveLock for MutexLock {}
