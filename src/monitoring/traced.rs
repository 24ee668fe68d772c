/*!
 * Traced Lock
 * Wraps any lock and emits one span per operation
 */

use super::tracer::span_lock;
use crate::core::errors::LockResult;
use crate::core::sync::locks::Lock;
use std::time::Duration;

/// Default threshold above which an operation is logged as slow
pub const DEFAULT_SLOW_THRESHOLD: Duration = Duration::from_millis(10);

/// Lock decorator that traces every operation
///
/// Results pass through unchanged.
pub struct TracedLock<L> {
    inner: L,
    slow_threshold: Duration,
}

impl<L: Lock> TracedLock<L> {
    pub fn new(inner: L) -> Self {
        Self::with_threshold(inner, DEFAULT_SLOW_THRESHOLD)
    }

    pub fn with_threshold(inner: L, slow_threshold: Duration) -> Self {
        Self {
            inner,
            slow_threshold,
        }
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }

    #[inline]
    fn traced<F>(&self, operation: &'static str, f: F) -> LockResult<()>
    where
        F: FnOnce(&L) -> LockResult<()>,
    {
        let span = span_lock(self.inner.name(), operation, self.slow_threshold);
        let result = f(&self.inner);
        span.record_result(&result);
        result
    }
}

impl<L: Lock> Lock for TracedLock<L> {
    fn remove(&self) -> LockResult<()> {
        self.traced("remove", L::remove)
    }

    fn acquire(&self) -> LockResult<()> {
        self.traced("acquire", L::acquire)
    }

    fn tryacquire(&self) -> LockResult<()> {
        self.traced("tryacquire", L::tryacquire)
    }

    fn release(&self) -> LockResult<()> {
        self.traced("release", L::release)
    }

    fn acquire_read(&self) -> LockResult<()> {
        self.traced("acquire_read", L::acquire_read)
    }

    fn acquire_write(&self) -> LockResult<()> {
        self.traced("acquire_write", L::acquire_write)
    }

    fn tryacquire_read(&self) -> LockResult<()> {
        self.traced("tryacquire_read", L::tryacquire_read)
    }

    fn tryacquire_write(&self) -> LockResult<()> {
        self.traced("tryacquire_write", L::tryacquire_write)
    }

    fn tryacquire_write_upgrade(&self) -> LockResult<()> {
        self.traced("tryacquire_write_upgrade", L::tryacquire_write_upgrade)
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
