/*!
 * RAII Lock Guards
 *
 * Scoped holds over any `Lock`, and a value container parameterized by lock
 * policy.
 *
 * ## Example
 *
 * ```rust
 * use ai_os_locks::core::guard::{Guard, Guarded};
 * use ai_os_locks::core::sync::{AdaptiveLock, LockConfig};
 *
 * let lock = AdaptiveLock::from_config(&LockConfig::default());
 * {
 *     let _held = Guard::acquire(&lock).unwrap();
 *     // released on drop
 * }
 *
 * let counter: Guarded<u32> = Guarded::new(0);
 * counter.with(|c| *c += 1).unwrap();
 * ```
 */

mod guarded;
mod lock;

pub use guarded::Guarded;
pub use lock::{Guard, ReadGuard, WriteGuard};
