/*!
 * Scoped Lock Guards
 *
 * RAII holds over any `Lock`: acquire on construction, release on drop.
 */

use crate::core::errors::{LockError, LockResult};
use crate::core::sync::locks::Lock;
use tracing::warn;

/// A hold that releases on drop unless disarmed
struct Hold<'a, L: Lock + ?Sized> {
    lock: &'a L,
    armed: bool,
    kind: &'static str,
}

impl<'a, L: Lock + ?Sized> Hold<'a, L> {
    fn new(lock: &'a L, kind: &'static str) -> Self {
        Self {
            lock,
            armed: true,
            kind,
        }
    }

    fn release(mut self) -> LockResult<()> {
        self.armed = false;
        self.lock.release()
    }

    fn disarm(mut self) -> &'a L {
        self.armed = false;
        self.lock
    }
}

impl<L: Lock + ?Sized> Drop for Hold<'_, L> {
    fn drop(&mut self) {
        if self.armed {
            if let Err(err) = self.lock.release() {
                warn!(
                    lock = self.lock.name(),
                    guard = self.kind,
                    error = %err,
                    "release on drop failed"
                );
            }
        }
    }
}

/// Exclusive hold on a lock
///
/// # Example
///
/// ```
/// use ai_os_locks::core::guard::Guard;
/// use ai_os_locks::core::sync::MutexLock;
///
/// let mutex = MutexLock::new();
/// {
///     let _guard = Guard::acquire(&mutex).unwrap();
///     assert!(mutex.is_held());
/// }
/// assert!(!mutex.is_held());
/// ```
pub struct Guard<'a, L: Lock + ?Sized> {
    hold: Hold<'a, L>,
}

impl<'a, L: Lock + ?Sized> Guard<'a, L> {
    /// Block until `lock` is held
    pub fn acquire(lock: &'a L) -> LockResult<Self> {
        lock.acquire()?;
        Ok(Self {
            hold: Hold::new(lock, "exclusive"),
        })
    }

    /// Take `lock` if free, `LockError::Busy` otherwise
    pub fn try_acquire(lock: &'a L) -> LockResult<Self> {
        lock.tryacquire()?;
        Ok(Self {
            hold: Hold::new(lock, "exclusive"),
        })
    }

    /// Release now and report the outcome
    pub fn release(self) -> LockResult<()> {
        self.hold.release()
    }
}

/// Shared hold; exclusive on primitives without shared locking
pub struct ReadGuard<'a, L: Lock + ?Sized> {
    hold: Hold<'a, L>,
}

impl<'a, L: Lock + ?Sized> ReadGuard<'a, L> {
    pub fn acquire(lock: &'a L) -> LockResult<Self> {
        lock.acquire_read()?;
        Ok(Self {
            hold: Hold::new(lock, "read"),
        })
    }

    pub fn try_acquire(lock: &'a L) -> LockResult<Self> {
        lock.tryacquire_read()?;
        Ok(Self {
            hold: Hold::new(lock, "read"),
        })
    }

    pub fn release(self) -> LockResult<()> {
        self.hold.release()
    }
}

/// Write hold
pub struct WriteGuard<'a, L: Lock + ?Sized> {
    hold: Hold<'a, L>,
}

impl<'a, L: Lock + ?Sized> WriteGuard<'a, L> {
    pub fn acquire(lock: &'a L) -> LockResult<Self> {
        lock.acquire_write()?;
        Ok(Self {
            hold: Hold::new(lock, "write"),
        })
    }

    pub fn try_acquire(lock: &'a L) -> LockResult<Self> {
        lock.tryacquire_write()?;
        Ok(Self {
            hold: Hold::new(lock, "write"),
        })
    }

    /// Turn a read hold into a write hold without releasing in between
    ///
    /// On failure the read guard comes back untouched with the error.
    pub fn try_upgrade(read: ReadGuard<'a, L>) -> Result<Self, (ReadGuard<'a, L>, LockError)> {
        match read.hold.lock.tryacquire_write_upgrade() {
            Ok(()) => {
                let lock = read.hold.disarm();
                Ok(Self {
                    hold: Hold::new(lock, "write"),
                })
            }
            Err(err) => Err((read, err)),
        }
    }

    pub fn release(self) -> LockResult<()> {
        self.hold.release()
    }
}
