/*!
 * Recursive Mutex Adapter
 * Exclusive lock that its owning thread may re-enter
 */

use super::traits::Lock;
use crate::core::errors::{InternalFailure, LockError, LockResult};
use parking_lot::{Condvar, Mutex};
use std::thread::{self, ThreadId};
use tracing::{debug, trace};

#[derive(Debug, Default)]
struct RecursiveState {
    owner: Option<ThreadId>,
    depth: u32,
    removed: bool,
}

/// Exclusive mutex with per-thread nesting
///
/// # Semantics
///
/// - **Shared locking**: none; read/write variants degrade to `acquire()`
/// - **Reentrancy**: the owning thread may acquire again (blocking or try);
///   each acquire needs a matching release
/// - **Other threads**: `tryacquire()` returns `Busy`, `acquire()` blocks
/// - **Unmatched release**: `InternalFailure::NotHeld` when the caller is not
///   the owner
pub struct RecursiveMutexLock {
    state: Mutex<RecursiveState>,
    available: Condvar,
}

impl RecursiveMutexLock {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RecursiveState::default()),
            available: Condvar::new(),
        }
    }

    /// Nesting depth held by the current thread
    pub fn depth(&self) -> u32 {
        let state = self.state.lock();
        if state.owner == Some(thread::current().id()) {
            state.depth
        } else {
            0
        }
    }

    /// Take or nest the lock if possible, `false` if another thread owns it
    fn enter(state: &mut RecursiveState, me: ThreadId) -> LockResult<bool> {
        match state.owner {
            None => {
                state.owner = Some(me);
                state.depth = 1;
                Ok(true)
            }
            Some(owner) if owner == me => {
                state.depth = state
                    .depth
                    .checked_add(1)
                    .ok_or(InternalFailure::Overflow)?;
                Ok(true)
            }
            Some(_) => Ok(false),
        }
    }
}

impl Default for RecursiveMutexLock {
    fn default() -> Self {
        Self::new()
    }
}

impl Lock for RecursiveMutexLock {
    fn remove(&self) -> LockResult<()> {
        let mut state = self.state.lock();
        if !state.removed {
            state.removed = true;
            self.available.notify_all();
            debug!("recursive mutex removed");
        }
        Ok(())
    }

    fn acquire(&self) -> LockResult<()> {
        let me = thread::current().id();
        let mut state = self.state.lock();
        loop {
            if state.removed {
                return Err(InternalFailure::Removed.into());
            }
            if Self::enter(&mut state, me)? {
                trace!(depth = state.depth, "recursive mutex acquired");
                return Ok(());
            }
            self.available.wait(&mut state);
        }
    }

    fn tryacquire(&self) -> LockResult<()> {
        let me = thread::current().id();
        let mut state = self.state.lock();
        if state.removed {
            return Err(InternalFailure::Removed.into());
        }
        if Self::enter(&mut state, me)? {
            Ok(())
        } else {
            Err(LockError::Busy)
        }
    }

    fn release(&self) -> LockResult<()> {
        let me = thread::current().id();
        let mut state = self.state.lock();
        if state.removed {
            return Err(InternalFailure::Removed.into());
        }
        if state.owner != Some(me) {
            return Err(InternalFailure::NotHeld.into());
        }
        state.depth -= 1;
        if state.depth == 0 {
            state.owner = None;
            self.available.notify_one();
            trace!("recursive mutex released");
        }
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
        "recursive_mutex"
    }
}
