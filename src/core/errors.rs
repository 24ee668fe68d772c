/*!
 * Error Types
 * Lock result channel with thiserror, miette and serde support
 */

use miette::Diagnostic;
use nix::errno::Errno;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type returned by every lock operation
pub type LockResult<T> = Result<T, LockError>;

/// Opaque failure of the underlying primitive
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "cause", content = "details", rename_all = "snake_case")]
pub enum InternalFailure {
    #[error("lock has been removed")]
    #[diagnostic(
        code(lock::removed),
        help("remove() destroys the primitive. Construct a new lock instead.")
    )]
    Removed,

    #[error("lock is not held by the caller")]
    #[diagnostic(
        code(lock::not_held),
        help("release() must follow a successful acquire on the same lock.")
    )]
    NotHeld,

    #[error("no read hold to upgrade")]
    #[diagnostic(
        code(lock::not_read_held),
        help("tryacquire_write_upgrade() requires a read hold taken with acquire_read().")
    )]
    NotReadHeld,

    #[error("hold count overflow")]
    #[diagnostic(
        code(lock::overflow),
        help("Too many releases or nested acquires for this primitive.")
    )]
    Overflow,

    #[error("primitive error: {0}")]
    #[diagnostic(code(lock::primitive))]
    Primitive(String),
}

/// Failure signal shared by all nine lock operations
///
/// `Busy` is only ever produced by non-blocking paths.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum LockError {
    #[error("lock is busy")]
    #[diagnostic(
        code(lock::busy),
        help("Another holder has the lock. Retry, or use the blocking operation.")
    )]
    Busy,

    #[error("internal lock failure: {0}")]
    #[diagnostic(transparent)]
    Internal(#[from] InternalFailure),
}

impl LockError {
    /// Contention on a non-blocking path
    #[inline]
    pub fn is_busy(&self) -> bool {
        matches!(self, LockError::Busy)
    }

    /// errno value an errno-style caller would have observed
    pub fn errno(&self) -> Errno {
        match self {
            LockError::Busy => Errno::EBUSY,
            LockError::Internal(InternalFailure::Removed) => Errno::EINVAL,
            LockError::Internal(InternalFailure::NotHeld) => Errno::EPERM,
            LockError::Internal(InternalFailure::NotReadHeld) => Errno::EPERM,
            LockError::Internal(InternalFailure::Overflow) => Errno::EOVERFLOW,
            LockError::Internal(InternalFailure::Primitive(_)) => Errno::EIO,
        }
    }

    /// `0` on success, `-1` on failure
    #[inline]
    pub fn status<T>(result: &LockResult<T>) -> i32 {
        if result.is_ok() {
            0
        } else {
            -1
        }
    }
}
