//! Concurrency tests for the in-memory store
//!
//! The per-module tests cover each contract sequentially; these race many
//! tasks against one record.

use std::sync::Arc;

use kvguard_domain::ports::providers::{StoreProvider, StoreScript};
use kvguard_providers::store::MemoryStoreProvider;
use std::time::Duration;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_set_if_absent_has_one_winner() {
    let store = Arc::new(MemoryStoreProvider::new());

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store
                    .set_if_absent("lock", &format!("token-{i}"), Duration::from_secs(5))
                    .await
                    .unwrap()
            })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_bounded_decrement_never_oversells() {
    let store = Arc::new(MemoryStoreProvider::new());
    store.set("stock", "10", None).await.unwrap();

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store
                    .run_script(StoreScript::BoundedDecrement, &["stock"], &["1".to_string()])
                    .await
                    .unwrap()
            })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        let result = handle.await.unwrap();
        assert!(result >= -1);
        if result >= 0 {
            successes += 1;
        }
    }

    assert_eq!(successes, 10);
    assert_eq!(store.get("stock").await.unwrap(), Some("0".to_string()));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_increments_count_every_call() {
    let store = Arc::new(MemoryStoreProvider::new());

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store
                    .run_script(
                        StoreScript::IncrementWithExpiry,
                        &["rate"],
                        &["60000".to_string()],
                    )
                    .await
                    .unwrap()
            })
        })
        .collect();

    let mut counts = Vec::new();
    for handle in handles {
        counts.push(handle.await.unwrap());
    }
    counts.sort_unstable();
    assert_eq!(counts, (1..=20).collect::<Vec<i64>>());
}

#[tokio::test]
async fn test_ttl_beyond_clock_range_never_expires() {
    let store = MemoryStoreProvider::new();

    assert!(
        store
            .set_if_absent("lock", "token", Duration::from_secs(u64::MAX))
            .await
            .unwrap()
    );
    assert_eq!(store.get("lock").await.unwrap().as_deref(), Some("token"));

    let count = store
        .run_script(
            StoreScript::IncrementWithExpiry,
            &["window"],
            &[i64::MAX.to_string()],
        )
        .await
        .unwrap();
    assert_eq!(count, 1);
}
