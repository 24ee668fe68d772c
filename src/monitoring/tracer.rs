/*!
 * Lock Tracing
 * Structured tracing setup and per-operation spans using the tracing crate
 */

use std::time::{Duration, Instant};
use tracing::{debug, info, span, warn, Level};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Environment variable enabling JSON output
pub const TRACE_JSON_ENV: &str = "LOCKS_TRACE_JSON";

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - LOCKS_TRACE_JSON: Enable JSON output (default: false)
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing() -> bool {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var(TRACE_JSON_ENV)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_thread_names(true)
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .try_init()
            .is_ok()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
            .is_ok()
    };

    if installed {
        info!(json = use_json, "lock tracing initialized");
    }
    installed
}

/// Span covering one lock operation
///
/// Logs the elapsed time on drop; operations slower than the threshold are
/// reported at `warn`.
pub struct LockSpan {
    span: tracing::Span,
    start: Instant,
    lock: &'static str,
    operation: &'static str,
    slow_threshold: Duration,
}

impl LockSpan {
    pub fn new(lock: &'static str, operation: &'static str, slow_threshold: Duration) -> Self {
        let span = span!(
            Level::TRACE,
            "lock_op",
            lock = lock,
            op = operation,
            result = tracing::field::Empty,
        );

        Self {
            span,
            start: Instant::now(),
            lock,
            operation,
            slow_threshold,
        }
    }

    /// Record the outcome of the operation
    pub fn record_result<T>(&self, result: &crate::core::errors::LockResult<T>) {
        match result {
            Ok(_) => self.span.record("result", "ok"),
            Err(err) if err.is_busy() => self.span.record("result", "busy"),
            Err(_) => self.span.record("result", "error"),
        };
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for LockSpan {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        let _entered = self.span.enter();

        if elapsed > self.slow_threshold {
            warn!(
                lock = self.lock,
                op = self.operation,
                elapsed_us = elapsed.as_micros() as u64,
                slow = true,
                "slow lock operation"
            );
        } else {
            debug!(
                lock = self.lock,
                op = self.operation,
                elapsed_us = elapsed.as_micros() as u64,
                "lock operation completed"
            );
        }
    }
}

/// Open a span for `operation` on `lock`
#[inline]
pub fn span_lock(
    lock: &'static str,
    operation: &'static str,
    slow_threshold: Duration,
) -> LockSpan {
    LockSpan::new(lock, operation, slow_threshold)
}
