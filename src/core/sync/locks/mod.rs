/*!
 * Lock Capability Layer
 *
 * One locking contract for every primitive:
 * - `Lock`: the nine-operation capability trait
 * - Adapters: mutex, recursive mutex, read-write lock, semaphore, null lock
 * - `AdaptiveLock`: forwards to a delegate chosen at construction
 * - `AnyLock`: runtime choice over the built-in adapters without a vtable
 * - `RecordingLock`: recording test double
 */

mod adaptive;
mod any;
mod mutex;
mod null;
pub mod recording;
mod recursive;
mod rwlock;
mod semaphore;
mod traits;

// Re-export public API
pub use adaptive::AdaptiveLock;
pub use any::AnyLock;
pub use mutex::MutexLock;
pub use null::NullLock;
pub use recording::{LockOp, RecordingLock};
pub use recursive::RecursiveMutexLock;
pub use rwlock::RwLockAdapter;
pub use semaphore::SemaphoreLock;
pub use traits::{ExclusiveLock, Lock};
