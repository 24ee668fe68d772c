/*!
 * Lock-Policy Container
 *
 * A value protected by a lock chosen through a type parameter.
 *
 * # Design: Static Policy
 *
 * `Guarded<T, L>` is written once against `Lock` and monomorphized per
 * policy, so there is no vtable and the layout is fixed by `L`. Call sites
 * that need the primitive picked at runtime use `AdaptiveLock` directly.
 */

use super::lock::{Guard, ReadGuard, WriteGuard};
use crate::core::errors::LockResult;
use crate::core::sync::locks::{ExclusiveLock, Lock, MutexLock};
use std::cell::UnsafeCell;
use std::fmt;

/// Value protected by lock policy `L`
///
/// Access goes through `L: ExclusiveLock` policies only. Policies that admit
/// several holders (`NullLock`, `SemaphoreLock`, `RecursiveMutexLock`) or
/// whose kind is chosen at runtime cannot hand out `&mut T` soundly.
///
/// # Example
///
/// ```
/// use ai_os_locks::core::guard::Guarded;
/// use ai_os_locks::core::sync::RwLockAdapter;
///
/// let table: Guarded<Vec<u32>, RwLockAdapter> = Guarded::new(vec![1, 2]);
/// table.write(|v| v.push(3)).unwrap();
/// assert_eq!(table.read(|v| v.len()).unwrap(), 3);
/// ```
pub struct Guarded<T, L: Lock = MutexLock> {
    lock: L,
    value: UnsafeCell<T>,
}

// SAFETY: `&T` or `&mut T` is only produced while `lock` is held in the
// matching mode, and `ExclusiveLock` guarantees those holds never overlap.
unsafe impl<T: Send + Sync, L: ExclusiveLock> Sync for Guarded<T, L> {}

impl<T, L: Lock + Default> Guarded<T, L> {
    pub fn new(value: T) -> Self {
        Self::with_lock(value, L::default())
    }
}

impl<T, L: Lock> Guarded<T, L> {
    /// Protect `value` with an existing lock instance
    pub fn with_lock(value: T, lock: L) -> Self {
        Self {
            lock,
            value: UnsafeCell::new(value),
        }
    }

    /// Destroy the underlying lock; later accesses fail
    pub fn remove(&self) -> LockResult<()> {
        self.lock.remove()
    }

    /// Direct access through `&mut self`, no locking needed
    pub fn get_mut(&mut self) -> &mut T {
        self.value.get_mut()
    }

    pub fn into_inner(self) -> T {
        self.value.into_inner()
    }

    /// Name of the lock policy
    pub fn policy(&self) -> &'static str {
        self.lock.name()
    }
}

impl<T, L: ExclusiveLock> Guarded<T, L> {
    /// Run `f` with exclusive access, blocking until the lock is held
    pub fn with<F, R>(&self, f: F) -> LockResult<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        let _guard = Guard::acquire(&self.lock)?;
        // SAFETY: exclusive hold taken above, released when `_guard` drops
        Ok(f(unsafe { &mut *self.value.get() }))
    }

    /// Like `with`, but `LockError::Busy` instead of blocking
    pub fn try_with<F, R>(&self, f: F) -> LockResult<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        let _guard = Guard::try_acquire(&self.lock)?;
        // SAFETY: exclusive hold taken above
        Ok(f(unsafe { &mut *self.value.get() }))
    }

    /// Run `f` with shared access
    pub fn read<F, R>(&self, f: F) -> LockResult<R>
    where
        F: FnOnce(&T) -> R,
    {
        let _guard = ReadGuard::acquire(&self.lock)?;
        // SAFETY: read hold excludes writers
        Ok(f(unsafe { &*self.value.get() }))
    }

    /// Run `f` with write access
    pub fn write<F, R>(&self, f: F) -> LockResult<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        let _guard = WriteGuard::acquire(&self.lock)?;
        // SAFETY: write hold excludes readers and writers
        Ok(f(unsafe { &mut *self.value.get() }))
    }
}

impl<T: Default, L: Lock + Default> Default for Guarded<T, L> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T, L: Lock> fmt::Debug for Guarded<T, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guarded")
            .field("policy", &self.lock.name())
            .finish_non_exhaustive()
    }
}
