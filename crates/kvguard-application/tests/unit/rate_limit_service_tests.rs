//! Fixed-window rate limiter tests

use std::sync::Arc;
use std::time::Duration;

use kvguard_application::{KeySpace, RateLimitService};
use kvguard_domain::value_objects::{RateDecision, RateLimitPolicy};
use kvguard_providers::store::MemoryStoreProvider;

use crate::support::{UnreachableStore, fixture, services};

fn per_second(max_count: u32) -> RateLimitPolicy {
    RateLimitPolicy::new("api", 1, max_count)
}

#[tokio::test(start_paused = true)]
async fn test_fourth_call_in_window_is_rejected() {
    let fx = fixture();
    let policy = per_second(3);

    for count in 1..=3 {
        let decision = fx.limiter.allow(&policy, "user-1").await.unwrap();
        assert_eq!(decision, RateDecision::Admitted { count, limit: 3 });
    }

    let fourth = fx.limiter.allow(&policy, "user-1").await.unwrap();
    assert_eq!(fourth, RateDecision::Rejected { count: 4, limit: 3 });
    assert_eq!(fourth.remaining(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_new_window_restarts_count() {
    let fx = fixture();
    let policy = per_second(3);

    for _ in 0..4 {
        fx.limiter.allow(&policy, "user-1").await.unwrap();
    }

    tokio::time::advance(Duration::from_millis(1001)).await;

    let decision = fx.limiter.allow(&policy, "user-1").await.unwrap();
    assert_eq!(decision, RateDecision::Admitted { count: 1, limit: 3 });
}

#[tokio::test(start_paused = true)]
async fn test_window_is_fixed_from_first_call() {
    let fx = fixture();
    let policy = per_second(2);

    fx.limiter.allow(&policy, "user-1").await.unwrap();
    tokio::time::advance(Duration::from_millis(600)).await;
    fx.limiter.allow(&policy, "user-1").await.unwrap();
    tokio::time::advance(Duration::from_millis(300)).await;
    assert!(!fx.limiter.allow(&policy, "user-1").await.unwrap().is_admitted());

    // 1000ms after the first call, not the last one
    tokio::time::advance(Duration::from_millis(101)).await;
    assert!(fx.limiter.allow(&policy, "user-1").await.unwrap().is_admitted());
}

#[tokio::test]
async fn test_keys_and_operations_are_independent() {
    let fx = fixture();
    let login = RateLimitPolicy::new("login", 60, 1);
    let search = RateLimitPolicy::new("search", 60, 1);

    assert!(fx.limiter.allow(&login, "user-1").await.unwrap().is_admitted());
    assert!(fx.limiter.allow(&login, "user-2").await.unwrap().is_admitted());
    assert!(fx.limiter.allow(&search, "user-1").await.unwrap().is_admitted());
    assert!(!fx.limiter.allow(&login, "user-1").await.unwrap().is_admitted());
}

#[tokio::test]
async fn test_sub_second_window() {
    let fx = fixture();
    let policy = RateLimitPolicy::with_window("burst", Duration::from_millis(250), 5);

    fx.limiter.allow(&policy, "k").await.unwrap();
    let ttl = fx.store.ttl("test:rate:burst:k").expect("window has an expiry");
    assert!(ttl <= Duration::from_millis(250));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_calls_admit_exactly_limit() {
    let fx = fixture();
    let policy = RateLimitPolicy::new("api", 60, 10);

    let handles: Vec<_> = (0..40)
        .map(|_| {
            let limiter = Arc::clone(&fx.limiter);
            let policy = policy.clone();
            tokio::spawn(async move { limiter.allow(&policy, "user-1").await.unwrap() })
        })
        .collect();

    let mut admitted = 0;
    for handle in handles {
        if handle.await.unwrap().is_admitted() {
            admitted += 1;
        }
    }
    assert_eq!(admitted, 10);
}

#[tokio::test]
async fn test_reset_drops_current_window() {
    let fx = fixture();
    let policy = RateLimitPolicy::new("api", 60, 1);

    fx.limiter.allow(&policy, "user-1").await.unwrap();
    assert!(!fx.limiter.allow(&policy, "user-1").await.unwrap().is_admitted());

    assert!(fx.limiter.reset(&policy, "user-1").await.unwrap());
    assert!(!fx.limiter.reset(&policy, "user-1").await.unwrap());
    assert!(fx.limiter.allow(&policy, "user-1").await.unwrap().is_admitted());
}

#[tokio::test]
async fn test_declared_policies() {
    let store = Arc::new(MemoryStoreProvider::new());
    let limiter = RateLimitService::new(store, KeySpace::default())
        .with_policies([RateLimitPolicy::new("checkout", 10, 1)])
        .unwrap();

    assert_eq!(limiter.policy("checkout").map(|p| p.max_count), Some(1));
    assert!(limiter.allow_declared("checkout", "u").await.unwrap().is_admitted());
    assert!(!limiter.allow_declared("checkout", "u").await.unwrap().is_admitted());

    let err = limiter.allow_declared("undeclared", "u").await.unwrap_err();
    assert!(err.is_contract_violation());
}

#[tokio::test]
async fn test_invalid_policies_are_rejected() {
    let fx = fixture();

    let zero_max = RateLimitPolicy::new("api", 1, 0);
    assert!(fx.limiter.allow(&zero_max, "k").await.unwrap_err().is_contract_violation());

    let zero_window = RateLimitPolicy::new("api", 0, 3);
    assert!(fx.limiter.allow(&zero_window, "k").await.unwrap_err().is_contract_violation());

    let huge_window = RateLimitPolicy::new("api", u64::MAX, 3);
    assert!(fx.limiter.allow(&huge_window, "k").await.unwrap_err().is_contract_violation());

    let empty_key = per_second(3);
    assert!(fx.limiter.allow(&empty_key, "").await.unwrap_err().is_contract_violation());
    assert!(fx.store.is_empty());

    let store = Arc::new(MemoryStoreProvider::new());
    let declared = RateLimitService::new(store, KeySpace::default())
        .with_policies([RateLimitPolicy::new("", 1, 1)]);
    assert!(declared.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_operation_and_key_cannot_share_a_window() {
    let fx = fixture();

    let nested = RateLimitPolicy::new("a:b", 1, 1);
    let err = fx.limiter.allow(&nested, "c").await.unwrap_err();
    assert!(err.is_contract_violation());
    assert!(fx.store.is_empty());

    let plain = RateLimitPolicy::new("a", 1, 1);
    let first = fx.limiter.allow(&plain, "b:c").await.unwrap();
    assert_eq!(first, RateDecision::Admitted { count: 1, limit: 1 });
    assert!(fx.limiter.reset(&nested, "c").await.unwrap_err().is_contract_violation());
}

#[tokio::test]
async fn test_store_failure_is_not_rate_limited() {
    let (_, _, limiter, _) = services(Arc::new(UnreachableStore));

    let err = limiter.allow(&per_second(3), "k").await.unwrap_err();
    assert!(err.is_transport());
    assert!(!err.is_rejection());
}
