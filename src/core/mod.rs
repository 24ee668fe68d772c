/*!
 * Core Module
 * Lock contract, adapters, guards and error handling
 */

pub mod errno;
pub mod errors;
pub mod guard;
pub mod sync;

// Re-export for convenience
pub use errors::*;
pub use guard::{Guard, Guarded, ReadGuard, WriteGuard};
pub use sync::{AdaptiveLock, AnyLock, Lock, LockConfig, LockKind};
