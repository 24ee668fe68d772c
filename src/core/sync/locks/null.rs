/*!
 * Null Lock
 * Lock vocabulary with no exclusion, for single-threaded configurations
 */

use super::traits::Lock;
use crate::core::errors::LockResult;

/// Lock whose every operation succeeds immediately
///
/// Provides no mutual exclusion: `tryacquire()` never reports `Busy` and
/// `release()` without an acquire is accepted. Use it where a lock policy is
/// required by a generic type but only one thread ever touches the data.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLock;

impl NullLock {
    pub const fn new() -> Self {
        Self
    }
}

impl Lock for NullLock {
    #[inline(always)]
    fn remove(&self) -> LockResult<()> {
        Ok(())
    }

    #[inline(always)]
    fn acquire(&self) -> LockResult<()> {
        Ok(())
    }

    #[inline(always)]
    fn tryacquire(&self) -> LockResult<()> {
        Ok(())
    }

    #[inline(always)]
    fn release(&self) -> LockResult<()> {
        Ok(())
    }

    #[inline(always)]
    fn acquire_read(&self) -> LockResult<()> {
        Ok(())
    }

    #[inline(always)]
    fn acquire_write(&self) -> LockResult<()> {
        Ok(())
    }

    #[inline(always)]
    fn tryacquire_read(&self) -> LockResult<()> {
        Ok(())
    }

    #[inline(always)]
    fn tryacquire_write(&self) -> LockResult<()> {
        Ok(())
    }

    #[inline(always)]
    fn tryacquire_write_upgrade(&self) -> LockResult<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "null"
    }
}
