/*!
 * Adaptive Lock
 * Defers the choice of primitive to construction time and forwards to it
 */

use super::any::AnyLock;
use super::traits::Lock;
use crate::core::errors::LockResult;
use crate::core::sync::config::LockConfig;
use std::fmt;
use std::sync::Arc;

/// How the delegate is held
enum Delegate<'a> {
    Owned(Box<dyn Lock + 'a>),
    Shared(Arc<dyn Lock + 'a>),
    Borrowed(&'a dyn Lock),
}

impl<'a> Delegate<'a> {
    #[inline(always)]
    fn get(&self) -> &(dyn Lock + 'a) {
        match self {
            Delegate::Owned(lock) => &**lock,
            Delegate::Shared(lock) => &**lock,
            Delegate::Borrowed(lock) => *lock,
        }
    }
}

/// Lock that forwards every operation to a delegate bound at construction
///
/// Every constructor binds the delegate, so there is no unbound state. Each
/// of the nine operations is a single forwarding call: the result is exactly
/// the delegate's, with no retries and nothing added.
///
/// # Ownership
///
/// - `owned` / `boxed`: the delegate is dropped with the adaptive lock
/// - `shared`: one `Arc` reference is released on drop
/// - `borrowed`: the delegate outlives the adaptive lock and is left alone
///
/// `remove()` is forwarded; it does not unbind the delegate.
///
/// # Example
///
/// ```
/// use ai_os_locks::core::sync::{AdaptiveLock, Lock, LockConfig, MutexLock};
///
/// let lock = AdaptiveLock::from_config(&LockConfig::exclusive());
/// lock.acquire().unwrap();
/// assert!(lock.tryacquire().unwrap_err().is_busy());
/// lock.release().unwrap();
///
/// let mutex = MutexLock::new();
/// let view = AdaptiveLock::borrowed(&mutex);
/// view.acquire().unwrap();
/// assert!(mutex.is_held());
/// ```
pub struct AdaptiveLock<'a> {
    delegate: Delegate<'a>,
}

impl<'a> AdaptiveLock<'a> {
    /// Take ownership of `lock`
    pub fn owned<L: Lock + 'a>(lock: L) -> Self {
        Self::boxed(Box::new(lock))
    }

    /// Take ownership of an already boxed lock
    pub fn boxed(lock: Box<dyn Lock + 'a>) -> Self {
        Self {
            delegate: Delegate::Owned(lock),
        }
    }

    /// Share a lock with other holders of the same `Arc`
    pub fn shared(lock: Arc<dyn Lock + 'a>) -> Self {
        Self {
            delegate: Delegate::Shared(lock),
        }
    }

    /// Forward to a lock owned elsewhere
    pub fn borrowed(lock: &'a dyn Lock) -> Self {
        Self {
            delegate: Delegate::Borrowed(lock),
        }
    }

    /// The bound delegate
    #[inline]
    pub fn delegate(&self) -> &(dyn Lock + 'a) {
        self.delegate.get()
    }
}

impl AdaptiveLock<'static> {
    /// Own the built-in adapter selected by `config`
    pub fn from_config(config: &LockConfig) -> Self {
        Self::owned(AnyLock::from_config(config))
    }
}

impl Lock for AdaptiveLock<'_> {
    #[inline]
    fn remove(&self) -> LockResult<()> {
        self.delegate.get().remove()
    }

    #[inline]
    fn acquire(&self) -> LockResult<()> {
        self.delegate.get().acquire()
    }

    #[inline]
    fn tryacquire(&self) -> LockResult<()> {
        self.delegate.get().tryacquire()
    }

    #[inline]
    fn release(&self) -> LockResult<()> {
        self.delegate.get().release()
    }

    #[inline]
    fn acquire_read(&self) -> LockResult<()> {
        self.delegate.get().acquire_read()
    }

    #[inline]
    fn acquire_write(&self) -> LockResult<()> {
        self.delegate.get().acquire_write()
    }

    #[inline]
    fn tryacquire_read(&self) -> LockResult<()> {
        self.delegate.get().tryacquire_read()
    }

    #[inline]
    fn tryacquire_write(&self) -> LockResult<()> {
        self.delegate.get().tryacquire_write()
    }

    #[inline]
    fn tryacquire_write_upgrade(&self) -> LockResult<()> {
        self.delegate.get().tryacquire_write_upgrade()
    }

    fn name(&self) -> &'static str {
        self.delegate.get().name()
    }
}

impl fmt::Debug for AdaptiveLock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ownership = match self.delegate {
            Delegate::Owned(_) => "owned",
            Delegate::Shared(_) => "shared",
            Delegate::Borrowed(_) => "borrowed",
        };
        f.debug_struct("AdaptiveLock")
            .field("delegate", &self.delegate.get().name())
            .field("ownership", &ownership)
            .finish()
    }
}
