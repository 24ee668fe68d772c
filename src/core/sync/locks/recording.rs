/*!
 * Recording Lock
 *
 * Test double that records every call and returns configured results.
 * Used to check delegating and generic code without real contention.
 */

use super::traits::Lock;
use crate::core::errors::LockResult;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// The nine lock operations, used to configure and inspect a `RecordingLock`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockOp {
    Remove,
    Acquire,
    TryAcquire,
    Release,
    AcquireRead,
    AcquireWrite,
    TryAcquireRead,
    TryAcquireWrite,
    TryAcquireWriteUpgrade,
}

impl LockOp {
    pub const ALL: [LockOp; 9] = [
        LockOp::Remove,
        LockOp::Acquire,
        LockOp::TryAcquire,
        LockOp::Release,
        LockOp::AcquireRead,
        LockOp::AcquireWrite,
        LockOp::TryAcquireRead,
        LockOp::TryAcquireWrite,
        LockOp::TryAcquireWriteUpgrade,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    /// Whether a successful call takes a hold
    fn takes_hold(self) -> bool {
        !matches!(self, LockOp::Remove | LockOp::Release)
    }

    /// Invoke this operation on any lock
    pub fn invoke<L: Lock + ?Sized>(self, lock: &L) -> LockResult<()> {
        match self {
            LockOp::Remove => lock.remove(),
            LockOp::Acquire => lock.acquire(),
            LockOp::TryAcquire => lock.tryacquire(),
            LockOp::Release => lock.release(),
            LockOp::AcquireRead => lock.acquire_read(),
            LockOp::AcquireWrite => lock.acquire_write(),
            LockOp::TryAcquireRead => lock.tryacquire_read(),
            LockOp::TryAcquireWrite => lock.tryacquire_write(),
            LockOp::TryAcquireWriteUpgrade => lock.tryacquire_write_upgrade(),
        }
    }
}

/// Recording fake lock
///
/// Every operation increments its call counter, appends to the call log and
/// returns the configured result (`Ok` unless set otherwise). A successful
/// acquire-type call sets `held`; a successful `release()` clears it.
/// Never blocks.
pub struct RecordingLock {
    results: Mutex<[LockResult<()>; 9]>,
    calls: [AtomicUsize; 9],
    log: Mutex<Vec<LockOp>>,
    held: AtomicBool,
}

impl RecordingLock {
    pub fn new() -> Self {
        Self {
            results: Mutex::new(std::array::from_fn(|_| Ok(()))),
            calls: std::array::from_fn(|_| AtomicUsize::new(0)),
            log: Mutex::new(Vec::new()),
            held: AtomicBool::new(false),
        }
    }

    /// Configure the result returned by `op`
    pub fn set_result(&self, op: LockOp, result: LockResult<()>) {
        self.results.lock()[op.index()] = result;
    }

    /// Builder form of `set_result`
    pub fn returning(self, op: LockOp, result: LockResult<()>) -> Self {
        self.set_result(op, result);
        self
    }

    /// Number of times `op` was called
    pub fn calls(&self, op: LockOp) -> usize {
        self.calls[op.index()].load(Ordering::SeqCst)
    }

    /// Total calls across all operations
    pub fn total_calls(&self) -> usize {
        self.calls.iter().map(|c| c.load(Ordering::SeqCst)).sum()
    }

    /// Calls in the order they happened
    pub fn log(&self) -> Vec<LockOp> {
        self.log.lock().clone()
    }

    pub fn held(&self) -> bool {
        self.held.load(Ordering::SeqCst)
    }

    fn record(&self, op: LockOp) -> LockResult<()> {
        self.calls[op.index()].fetch_add(1, Ordering::SeqCst);
        self.log.lock().push(op);
        let result = self.results.lock()[op.index()].clone();
        if result.is_ok() {
            if op.takes_hold() {
                self.held.store(true, Ordering::SeqCst);
            } else if op == LockOp::Release {
                self.held.store(false, Ordering::SeqCst);
            }
        }
        result
    }
}

impl Default for RecordingLock {
    fn default() -> Self {
        Self::new()
    }
}

impl Lock for RecordingLock {
    fn remove(&self) -> LockResult<()> {
        self.record(LockOp::Remove)
    }

    fn acquire(&self) -> LockResult<()> {
        self.record(LockOp::Acquire)
    }

    fn tryacquire(&self) -> LockResult<()> {
        self.record(LockOp::TryAcquire)
    }

    fn release(&self) -> LockResult<()> {
        self.record(LockOp::Release)
    }

    fn acquire_read(&self) -> LockResult<()> {
        self.record(LockOp::AcquireRead)
    }

    fn acquire_write(&self) -> LockResult<()> {
        self.record(LockOp::AcquireWrite)
    }

    fn tryacquire_read(&self) -> LockResult<()> {
        self.record(LockOp::TryAcquireRead)
    }

    fn tryacquire_write(&self) -> LockResult<()> {
        self.record(LockOp::TryAcquireWrite)
    }

    fn tryacquire_write_upgrade(&self) -> LockResult<()> {
        self.record(LockOp::TryAcquireWriteUpgrade)
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}
