/*!
 * Enum-Dispatched Lock
 *
 * # Design: Closed Set Instead of a Vtable
 *
 * `AnyLock` picks its primitive at runtime like `AdaptiveLock`, but over the
 * known adapters only. Dispatch is a `match`, so calls inline and the value
 * has a fixed layout with no trait object inside.
 */

use super::mutex::MutexLock;
use super::null::NullLock;
use super::recursive::RecursiveMutexLock;
use super::rwlock::RwLockAdapter;
use super::semaphore::SemaphoreLock;
use super::traits::Lock;
use crate::core::errors::LockResult;
use crate::core::sync::config::{LockConfig, LockKind};
use tracing::debug;

/// One of the built-in adapters
pub enum AnyLock {
    Mutex(MutexLock),
    Recursive(RecursiveMutexLock),
    RwLock(RwLockAdapter),
    Semaphore(SemaphoreLock),
    Null(NullLock),
}

macro_rules! dispatch {
    ($self:ident, $op:ident) => {
        match $self {
            AnyLock::Mutex(l) => l.$op(),
            AnyLock::Recursive(l) => l.$op(),
            AnyLock::RwLock(l) => l.$op(),
            AnyLock::Semaphore(l) => l.$op(),
            AnyLock::Null(l) => l.$op(),
        }
    };
}

impl AnyLock {
    /// Build the adapter selected by `config`
    pub fn from_config(config: &LockConfig) -> Self {
        let kind = config.select_kind();
        debug!(?kind, permits = config.semaphore_permits, "building lock");
        match kind {
            LockKind::Mutex | LockKind::Auto => AnyLock::Mutex(MutexLock::new()),
            LockKind::Recursive => AnyLock::Recursive(RecursiveMutexLock::new()),
            LockKind::RwLock => AnyLock::RwLock(RwLockAdapter::new()),
            // Deserialized configs bypass the zero check in `from_env`
            LockKind::Semaphore => {
                AnyLock::Semaphore(SemaphoreLock::new(config.semaphore_permits.max(1)))
            }
            LockKind::Null => AnyLock::Null(NullLock::new()),
        }
    }

    /// Kind of the wrapped adapter
    pub fn kind(&self) -> LockKind {
        match self {
            AnyLock::Mutex(_) => LockKind::Mutex,
            AnyLock::Recursive(_) => LockKind::Recursive,
            AnyLock::RwLock(_) => LockKind::RwLock,
            AnyLock::Semaphore(_) => LockKind::Semaphore,
            AnyLock::Null(_) => LockKind::Null,
        }
    }
}

impl Default for AnyLock {
    fn default() -> Self {
        Self::from_config(&LockConfig::default())
    }
}

impl Lock for AnyLock {
    #[inline(always)]
    fn remove(&self) -> LockResult<()> {
        dispatch!(self, remove)
    }

    #[inline(always)]
    fn acquire(&self) -> LockResult<()> {
        dispatch!(self, acquire)
    }

    #[inline(always)]
    fn tryacquire(&self) -> LockResult<()> {
        dispatch!(self, tryacquire)
    }

    #[inline(always)]
    fn release(&self) -> LockResult<()> {
        dispatch!(self, release)
    }

    #[inline(always)]
    fn acquire_read(&self) -> LockResult<()> {
        dispatch!(self, acquire_read)
    }

    #[inline(always)]
    fn acquire_write(&self) -> LockResult<()> {
        dispatch!(self, acquire_write)
    }

    #[inline(always)]
    fn tryacquire_read(&self) -> LockResult<()> {
        dispatch!(self, tryacquire_read)
    }

    #[inline(always)]
    fn tryacquire_write(&self) -> LockResult<()> {
        dispatch!(self, tryacquire_write)
    }

    #[inline(always)]
    fn tryacquire_write_upgrade(&self) -> LockResult<()> {
        dispatch!(self, tryacquire_write_upgrade)
    }

    fn name(&self) -> &'static str {
        dispatch!(self, name)
    }
}
