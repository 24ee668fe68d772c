/*!
 * Lock Monitoring
 * Structured tracing for lock operations
 */

mod traced;
mod tracer;

pub use traced::TracedLock;
pub use tracer::{init_tracing, span_lock, LockSpan};
