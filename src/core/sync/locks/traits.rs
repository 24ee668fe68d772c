/*!
 * Lock Capability Trait
 *
 * The uniform locking vocabulary every synchronization primitive exposes.
 *
 * # Design: One Trait, Two Dispatch Modes
 *
 * `Lock` is object safe, so `&dyn Lock`, `Box<dyn Lock>` and `Arc<dyn Lock>`
 * work where the primitive is chosen at runtime (see `AdaptiveLock`).
 * Generic code bounded by `L: Lock + ?Sized` monomorphizes for concrete
 * primitives and pays nothing for dispatch.
 */

use crate::core::errors::LockResult;
use std::sync::Arc;

/// Uniform locking API supported by every primitive adapter
///
/// Implementations must be:
/// - **Thread-safe**: concurrent `acquire`/`release` pairs from independent
///   threads are the steady state
/// - **Non-blocking on `try*`**: report contention as `LockError::Busy`
/// - **Degrading**: primitives without shared locking implement the read and
///   write variants as plain exclusive operations
///
/// Fairness among blocked waiters is whatever the primitive provides.
pub trait Lock: Send + Sync {
    /// Explicitly destroy the primitive
    ///
    /// Only one thread may call this, and never concurrently with any other
    /// operation on the same lock. Nothing protects against racing callers.
    fn remove(&self) -> LockResult<()>;

    /// Block until the lock is held exclusively
    fn acquire(&self) -> LockResult<()>;

    /// Acquire exclusively without blocking
    ///
    /// Returns `LockError::Busy` if another holder has it.
    fn tryacquire(&self) -> LockResult<()>;

    /// Release an exclusive or write hold
    ///
    /// Calling this without a matching successful acquire is a contract
    /// violation; each adapter documents what it does in that case.
    fn release(&self) -> LockResult<()>;

    /// Block until a shared hold is taken, or `acquire()` without shared locking
    fn acquire_read(&self) -> LockResult<()>;

    /// Block until a write hold is taken, or `acquire()` without shared locking
    fn acquire_write(&self) -> LockResult<()>;

    /// Non-blocking `acquire_read()`, `Busy` on contention
    fn tryacquire_read(&self) -> LockResult<()>;

    /// Non-blocking `acquire_write()`, `Busy` on contention
    fn tryacquire_write(&self) -> LockResult<()>;

    /// Convert a held read lock into a write lock with no release window
    ///
    /// Binary outcome: `Ok` means upgraded, any `Err` means the read hold is
    /// still in place. Primitives without shared locking call `acquire()`.
    fn tryacquire_write_upgrade(&self) -> LockResult<()>;

    /// Primitive name for diagnostics
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

macro_rules! forward_lock {
    ($($ptr:ty),*) => {$(
        impl<L: Lock + ?Sized> Lock for $ptr {
            #[inline(always)]
            fn remove(&self) -> LockResult<()> {
                (**self).remove()
            }
            #[inline(always)]
            fn acquire(&self) -> LockResult<()> {
                (**self).acquire()
            }
            #[inline(always)]
            fn tryacquire(&self) -> LockResult<()> {
                (**self).tryacquire()
            }
            #[inline(always)]
            fn release(&self) -> LockResult<()> {
                (**self).release()
            }
            #[inline(always)]
            fn acquire_read(&self) -> LockResult<()> {
                (**self).acquire_read()
            }
            #[inline(always)]
            fn acquire_write(&self) -> LockResult<()> {
                (**self).acquire_write()
            }
            #[inline(always)]
            fn tryacquire_read(&self) -> LockResult<()> {
                (**self).tryacquire_read()
            }
            #[inline(always)]
            fn tryacquire_write(&self) -> LockResult<()> {
                (**self).tryacquire_write()
            }
            #[inline(always)]
            fn tryacquire_write_upgrade(&self) -> LockResult<()> {
                (**self).tryacquire_write_upgrade()
            }
            fn name(&self) -> &'static str {
                (**self).name()
            }
        }
    )*};
}

forward_lock!(&L, Box<L>, Arc<L>);

/// Marker for locks whose exclusive side admits exactly one holder
///
/// # Safety
///
/// A successful `acquire()`/`acquire_write()` must exclude every other
/// successful acquire of any kind, on every thread, until the matching
/// `release()`, including re-acquires by the same thread. A successful
/// `acquire_read()` must exclude every exclusive hold. `Guarded` relies on
/// this to hand out `&mut T`.
pub unsafe trait ExclusiveLock: Lock {}
