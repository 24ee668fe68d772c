/*!
 * Adaptive Lock Tests
 */

use ai_os_locks::core::sync::{AdaptiveLock, Lock, LockConfig, LockOp, MutexLock, RecordingLock};
use ai_os_locks::{InternalFailure, LockError, LockResult};
use mockall::mock;
use pretty_assertions::assert_eq;
use std::sync::Arc;

mock! {
    pub Delegate {}

    impl Lock for Delegate {
        fn remove(&self) -> LockResult<()>;
        fn acquire(&self) -> LockResult<()>;
        fn tryacquire(&self) -> LockResult<()>;
        fn release(&self) -> LockResult<()>;
        fn acquire_read(&self) -> LockResult<()>;
        fn acquire_write(&self) -> LockResult<()>;
        fn tryacquire_read(&self) -> LockResult<()>;
        fn tryacquire_write(&self) -> LockResult<()>;
        fn tryacquire_write_upgrade(&self) -> LockResult<()>;
        fn name(&self) -> &'static str;
    }
}

fn outcomes() -> Vec<LockResult<()>> {
    vec![
        Ok(()),
        Err(LockError::Busy),
        Err(InternalFailure::Removed.into()),
        Err(InternalFailure::Primitive("EDEADLK".into()).into()),
    ]
}

#[test]
fn test_every_operation_forwards_once() {
    for op in LockOp::ALL {
        for outcome in outcomes() {
            let fake = RecordingLock::new().returning(op, outcome.clone());
            let lock = AdaptiveLock::borrowed(&fake);

            assert_eq!(op.invoke(&lock), outcome, "{:?}", op);
            assert_eq!(fake.calls(op), 1, "{:?}", op);
            assert_eq!(fake.total_calls(), 1, "{:?}", op);
        }
    }
}

#[test]
fn test_forwarding_through_every_ownership() {
    let shared = Arc::new(RecordingLock::new());
    let borrowed = RecordingLock::new();

    let locks = [
        AdaptiveLock::owned(RecordingLock::new()),
        AdaptiveLock::boxed(Box::new(RecordingLock::new())),
        AdaptiveLock::shared(shared.clone()),
        AdaptiveLock::borrowed(&borrowed),
    ];

    for lock in &locks {
        for op in LockOp::ALL {
            assert!(op.invoke(lock).is_ok());
        }
        assert_eq!(lock.name(), "recording");
    }

    assert_eq!(shared.log(), LockOp::ALL.to_vec());
    assert_eq!(borrowed.log(), LockOp::ALL.to_vec());
}

#[test]
fn test_mock_delegate_sees_each_call() {
    let mut mock = MockDelegate::new();
    mock.expect_remove().times(1).returning(|| Ok(()));
    mock.expect_acquire().times(1).returning(|| Ok(()));
    mock.expect_tryacquire().times(1).returning(|| Err(LockError::Busy));
    mock.expect_release()
        .times(1)
        .returning(|| Err(InternalFailure::NotHeld.into()));
    mock.expect_acquire_read().times(1).returning(|| Ok(()));
    mock.expect_acquire_write().times(1).returning(|| Ok(()));
    mock.expect_tryacquire_read().times(1).returning(|| Err(LockError::Busy));
    mock.expect_tryacquire_write().times(1).returning(|| Ok(()));
    mock.expect_tryacquire_write_upgrade()
        .times(1)
        .returning(|| Err(LockError::Busy));

    let lock = AdaptiveLock::owned(mock);
    assert_eq!(lock.remove(), Ok(()));
    assert_eq!(lock.acquire(), Ok(()));
    assert_eq!(lock.tryacquire(), Err(LockError::Busy));
    assert_eq!(lock.release(), Err(InternalFailure::NotHeld.into()));
    assert_eq!(lock.acquire_read(), Ok(()));
    assert_eq!(lock.acquire_write(), Ok(()));
    assert_eq!(lock.tryacquire_read(), Err(LockError::Busy));
    assert_eq!(lock.tryacquire_write(), Ok(()));
    assert_eq!(lock.tryacquire_write_upgrade(), Err(LockError::Busy));
    // Expectations are verified when the owned mock drops with `lock`
}

#[test]
fn test_scenario_tryacquire_busy() {
    let fake = RecordingLock::new().returning(LockOp::TryAcquire, Err(LockError::Busy));
    let lock = AdaptiveLock::borrowed(&fake);

    assert_eq!(lock.tryacquire(), Err(LockError::Busy));
    assert_eq!(fake.calls(LockOp::TryAcquire), 1);
}

#[test]
fn test_scenario_acquire_write_holds() {
    let fake = RecordingLock::new();
    let lock = AdaptiveLock::borrowed(&fake);

    assert_eq!(lock.acquire_write(), Ok(()));
    assert!(fake.held());
}

#[test]
fn test_remove_forwarded_without_unbinding() {
    let mutex = MutexLock::new();
    let lock = AdaptiveLock::borrowed(&mutex);

    assert!(lock.remove().is_ok());
    assert_eq!(lock.acquire(), Err(InternalFailure::Removed.into()));
    assert_eq!(mutex.acquire(), Err(InternalFailure::Removed.into()));
}

#[test]
fn test_one_type_many_primitives() {
    let locks: Vec<AdaptiveLock<'static>> = [
        LockConfig::exclusive(),
        LockConfig::read_mostly(),
        LockConfig::bounded(2),
        LockConfig::single_threaded(),
    ]
    .iter()
    .map(AdaptiveLock::from_config)
    .collect();

    let names: Vec<_> = locks.iter().map(|l| l.name()).collect();
    assert_eq!(names, vec!["mutex", "rw_lock", "semaphore", "null"]);

    // Same call site, different primitives
    for lock in &locks {
        lock.acquire().unwrap();
        lock.release().unwrap();
    }
}
