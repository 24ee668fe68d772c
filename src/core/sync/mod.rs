/*!
 * Synchronization Primitives
 *
 * Uniform locking API over interchangeable primitives.
 *
 * # Architecture
 *
 * Generic code is written against the `Lock` trait. Concrete adapters
 * implement it directly; `AdaptiveLock` implements it by forwarding to a
 * delegate picked when the lock is built, typically from a `LockConfig`.
 *
 * # Performance
 *
 * - Generic `L: Lock` call sites monomorphize, no dispatch cost
 * - `AnyLock` dispatches by `match` over the built-in adapters
 * - `AdaptiveLock` pays one indirect call per operation
 */

mod config;
pub mod locks;

pub use config::{ConfigError, LockConfig, LockKind, LOCK_KIND_ENV, LOCK_PERMITS_ENV};
pub use locks::{
    AdaptiveLock, AnyLock, ExclusiveLock, Lock, LockOp, MutexLock, NullLock, RecordingLock,
    RecursiveMutexLock, RwLockAdapter, SemaphoreLock,
};
