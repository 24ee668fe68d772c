/*!
 * Guard Tests
 */

use ai_os_locks::core::guard::{Guard, Guarded, ReadGuard, WriteGuard};
use ai_os_locks::core::sync::{
    AdaptiveLock, Lock, LockConfig, LockOp, MutexLock, RecordingLock, RwLockAdapter,
};
use ai_os_locks::LockError;
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

/// Generic algorithm written once against the lock contract
fn transfer<L: Lock + ?Sized>(lock: &L, from: &mut u64, to: &mut u64, amount: u64) -> bool {
    let Ok(_guard) = Guard::acquire(lock) else {
        return false;
    };
    if *from < amount {
        return false;
    }
    *from -= amount;
    *to += amount;
    true
}

#[test]
fn test_generic_algorithm_over_any_lock() {
    let static_lock = MutexLock::new();
    let dynamic_lock = AdaptiveLock::from_config(&LockConfig::read_mostly());
    let (mut a, mut b) = (10, 0);

    assert!(transfer(&static_lock, &mut a, &mut b, 4));
    assert!(transfer(&dynamic_lock, &mut a, &mut b, 4));
    assert!(!transfer(&dynamic_lock as &dyn Lock, &mut a, &mut b, 4));
    assert_eq!((a, b), (2, 8));

    // Every path released its hold
    assert!(static_lock.tryacquire().is_ok());
    assert!(dynamic_lock.tryacquire().is_ok());
}

#[test]
fn test_guard_try_acquire_busy() {
    let lock = MutexLock::new();
    let _held = Guard::acquire(&lock).unwrap();
    assert!(matches!(Guard::try_acquire(&lock), Err(LockError::Busy)));
}

#[test]
fn test_release_failure_on_drop_is_swallowed() {
    let fake = RecordingLock::new().returning(LockOp::Release, Err(LockError::Busy));
    {
        let _guard = ReadGuard::acquire(&fake).unwrap();
    }
    assert_eq!(fake.calls(LockOp::Release), 1);
    assert!(fake.held());
}

#[test]
fn test_upgrade_sequence_on_fake() {
    let fake = RecordingLock::new();
    let read = ReadGuard::acquire(&fake).unwrap();
    let write = WriteGuard::try_upgrade(read).ok().unwrap();
    write.release().unwrap();

    assert_eq!(
        fake.log(),
        vec![
            LockOp::AcquireRead,
            LockOp::TryAcquireWriteUpgrade,
            LockOp::Release
        ]
    );
}

#[test]
fn test_guarded_map_shared_between_threads() {
    let map: Arc<Guarded<HashMap<u32, u32>, RwLockAdapter>> = Arc::new(Guarded::default());

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let map = map.clone();
            thread::spawn(move || {
                for i in 0..100 {
                    map.write(|m| m.insert(t * 100 + i, i)).unwrap();
                    map.read(|m| assert!(m.contains_key(&(t * 100 + i)))).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(map.read(|m| m.len()).unwrap(), 400);
    assert_eq!(map.policy(), "rw_lock");
}
