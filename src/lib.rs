/*!
 * AI-OS Lock Library
 * Uniform lock capability layer with runtime-selectable primitives
 */

pub mod core;
pub mod monitoring;

// Re-exports
pub use crate::core::errors::{InternalFailure, LockError, LockResult};
pub use crate::core::guard::{Guard, Guarded, ReadGuard, WriteGuard};
pub use crate::core::sync::{
    AdaptiveLock, AnyLock, ExclusiveLock, Lock, LockConfig, LockKind, MutexLock, NullLock,
    RecursiveMutexLock, RwLockAdapter, SemaphoreLock,
};
pub use monitoring::init_tracing;
