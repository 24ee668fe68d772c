/*!
 * Adapter Behaviour Tests
 *
 * Reentrancy and misuse behaviour documented by each adapter.
 */

use ai_os_locks::core::errno::{self, ErrnoMirror};
use ai_os_locks::core::sync::{
    Lock, MutexLock, NullLock, RecursiveMutexLock, RwLockAdapter, SemaphoreLock,
};
use ai_os_locks::monitoring::TracedLock;
use ai_os_locks::{InternalFailure, LockError};
use nix::errno::Errno;
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[test]
fn test_mutex_not_reentrant() {
    let lock = MutexLock::new();
    lock.acquire_read().unwrap();
    // The holder itself is refused
    assert_eq!(lock.tryacquire_read(), Err(LockError::Busy));
    assert_eq!(lock.tryacquire(), Err(LockError::Busy));
    lock.release().unwrap();
}

#[test]
fn test_mutex_release_from_other_thread() {
    let lock = Arc::new(MutexLock::new());
    lock.acquire().unwrap();

    let other = lock.clone();
    assert!(thread::spawn(move || other.release()).join().unwrap().is_ok());
    assert!(!lock.is_held());
}

#[test]
fn test_recursive_reentrant_for_owner_only() {
    let lock = Arc::new(RecursiveMutexLock::new());
    lock.acquire_write().unwrap();
    lock.acquire_read().unwrap();
    assert_eq!(lock.depth(), 2);

    let other = lock.clone();
    let result = thread::spawn(move || other.tryacquire_read()).join().unwrap();
    assert_eq!(result, Err(LockError::Busy));

    lock.release().unwrap();
    lock.release().unwrap();
    assert_eq!(lock.release(), Err(InternalFailure::NotHeld.into()));
}

#[test]
fn test_rwlock_reader_cannot_take_write_without_upgrade() {
    let lock = RwLockAdapter::new();
    lock.acquire_read().unwrap();
    assert_eq!(lock.tryacquire_write(), Err(LockError::Busy));
    assert!(lock.tryacquire_write_upgrade().is_ok());
    assert_eq!(lock.tryacquire_read(), Err(LockError::Busy));
    lock.release().unwrap();
}

#[test]
fn test_rwlock_concurrent_readers() {
    let lock = Arc::new(RwLockAdapter::new());
    let inside = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let lock = lock.clone();
            let inside = inside.clone();
            let peak = peak.clone();
            thread::spawn(move || {
                lock.acquire_read().unwrap();
                let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                thread::sleep(Duration::from_millis(50));
                inside.fetch_sub(1, Ordering::SeqCst);
                lock.release().unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert!(peak.load(Ordering::SeqCst) > 1, "readers never overlapped");
}

#[test]
fn test_semaphore_bounds_holders() {
    let sem = Arc::new(SemaphoreLock::new(2));
    let inside = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let sem = sem.clone();
            let inside = inside.clone();
            let peak = peak.clone();
            thread::spawn(move || {
                sem.acquire().unwrap();
                let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                thread::sleep(Duration::from_millis(10));
                inside.fetch_sub(1, Ordering::SeqCst);
                sem.release().unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert!(peak.load(Ordering::SeqCst) <= 2);
    assert_eq!(sem.permits(), 2);
}

#[test]
fn test_semaphore_unmatched_release() {
    let sem = SemaphoreLock::binary();
    assert_eq!(sem.release(), Err(InternalFailure::Overflow.into()));
    sem.acquire().unwrap();
    assert!(sem.release().is_ok());
}

#[test]
fn test_null_lock_never_busy() {
    let lock = NullLock::new();
    lock.acquire().unwrap();
    assert!(lock.tryacquire().is_ok());
    assert!(lock.tryacquire_write_upgrade().is_ok());
    assert!(lock.release().is_ok());
    assert!(lock.release().is_ok());
}

#[test]
fn test_operations_after_remove() {
    let adapters: Vec<Box<dyn Lock>> = vec![
        Box::new(MutexLock::new()),
        Box::new(RecursiveMutexLock::new()),
        Box::new(RwLockAdapter::new()),
        Box::new(SemaphoreLock::binary()),
    ];

    for lock in adapters {
        lock.remove().unwrap();
        assert!(lock.remove().is_ok(), "{}", lock.name());
        assert_eq!(lock.acquire(), Err(InternalFailure::Removed.into()));
        assert_eq!(lock.tryacquire(), Err(InternalFailure::Removed.into()));
        assert_eq!(lock.acquire_read(), Err(InternalFailure::Removed.into()));
        assert_eq!(lock.release(), Err(InternalFailure::Removed.into()));
    }
}

#[test]
fn test_remove_wakes_blocked_reader() {
    let lock = Arc::new(RwLockAdapter::new());
    lock.acquire_write().unwrap();

    let reader = {
        let lock = lock.clone();
        thread::spawn(move || lock.acquire_read())
    };

    thread::sleep(Duration::from_millis(30));
    lock.remove().unwrap();
    assert_eq!(reader.join().unwrap(), Err(InternalFailure::Removed.into()));
}

#[test]
fn test_errno_shim_mirrors_failures() {
    errno::clear();
    let lock = ErrnoMirror::new(SemaphoreLock::binary());

    lock.acquire().unwrap();
    assert_eq!(errno::last_error(), None);

    assert_eq!(lock.tryacquire(), Err(LockError::Busy));
    assert_eq!(errno::last_errno(), Some(Errno::EBUSY));

    lock.release().unwrap();
    assert_eq!(lock.release(), Err(InternalFailure::Overflow.into()));
    assert_eq!(errno::last_errno(), Some(Errno::EOVERFLOW));
    assert_eq!(LockError::status(&lock.release()), -1);
}

#[test]
fn test_traced_lock_keeps_semantics() {
    let lock = TracedLock::with_threshold(MutexLock::new(), Duration::from_millis(1));
    lock.acquire().unwrap();
    assert_eq!(lock.tryacquire(), Err(LockError::Busy));
    lock.release().unwrap();
    assert!(!lock.inner().is_held());
}
