/*!
 * errno Compatibility Shim
 *
 * Mirrors lock results into a thread-scoped "last error" slot for callers
 * written against the errno convention. The returned `LockResult` stays the
 * primary contract; the slot is only a copy.
 */

use crate::core::errors::{LockError, LockResult};
use crate::core::sync::locks::Lock;
use nix::errno::Errno;
use std::cell::RefCell;

thread_local! {
    static LAST_ERROR: RefCell<Option<LockError>> = const { RefCell::new(None) };
}

/// Error recorded by the last mirrored failure on this thread
pub fn last_error() -> Option<LockError> {
    LAST_ERROR.with(|slot| slot.borrow().clone())
}

/// errno of the last mirrored failure on this thread
pub fn last_errno() -> Option<Errno> {
    LAST_ERROR.with(|slot| slot.borrow().as_ref().map(LockError::errno))
}

/// Reset the slot on this thread
pub fn clear() {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = None);
}

/// Copy a failed result into the slot, returning the result unchanged
///
/// Successful results leave the slot alone, as errno does.
#[inline]
pub fn mirror<T>(result: LockResult<T>) -> LockResult<T> {
    if let Err(err) = &result {
        LAST_ERROR.with(|slot| *slot.borrow_mut() = Some(err.clone()));
    }
    result
}

/// Lock wrapper that mirrors every result into the errno slot
///
/// # Example
///
/// ```
/// use ai_os_locks::core::errno::{self, ErrnoMirror};
/// use ai_os_locks::core::errors::LockError;
/// use ai_os_locks::core::sync::{Lock, MutexLock};
/// use nix::errno::Errno;
///
/// let lock = ErrnoMirror::new(MutexLock::new());
/// lock.acquire().unwrap();
/// assert_eq!(LockError::status(&lock.tryacquire()), -1);
/// assert_eq!(errno::last_errno(), Some(Errno::EBUSY));
/// ```
pub struct ErrnoMirror<L> {
    inner: L,
}

impl<L: Lock> ErrnoMirror<L> {
    pub fn new(inner: L) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }

    pub fn into_inner(self) -> L {
        self.inner
    }
}

impl<L: Lock> Lock for ErrnoMirror<L> {
    fn remove(&self) -> LockResult<()> {
        mirror(self.inner.remove())
    }

    fn acquire(&self) -> LockResult<()> {
        mirror(self.inner.acquire())
    }

    fn tryacquire(&self) -> LockResult<()> {
        mirror(self.inner.tryacquire())
    }

    fn release(&self) -> LockResult<()> {
        mirror(self.inner.release())
    }

    fn acquire_read(&self) -> LockResult<()> {
        mirror(self.inner.acquire_read())
    }

    fn acquire_write(&self) -> LockResult<()> {
        mirror(self.inner.acquire_write())
    }

    fn tryacquire_read(&self) -> LockResult<()> {
        mirror(self.inner.tryacquire_read())
    }

    fn tryacquire_write(&self) -> LockResult<()> {
        mirror(self.inner.tryacquire_write())
    }

    fn tryacquire_write_upgrade(&self) -> LockResult<()> {
        mirror(self.inner.tryacquire_write_upgrade())
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
