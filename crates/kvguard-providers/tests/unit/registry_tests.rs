//! Store provider registry tests
//!
//! `kvguard_providers` must be linked for its `linkme` entries to show up.

use kvguard_application::ports::registry::{
    StoreProviderConfig, list_store_providers, resolve_store_provider,
};

extern crate kvguard_providers;

#[test]
fn test_registered_providers_are_listed() {
    let names: Vec<&str> = list_store_providers()
        .into_iter()
        .map(|(name, _)| name)
        .collect();

    #[cfg(feature = "store-memory")]
    assert!(names.contains(&"memory"), "memory missing from {names:?}");
    #[cfg(feature = "store-redis")]
    assert!(names.contains(&"redis"), "redis missing from {names:?}");
}

#[test]
fn test_unknown_provider_lists_alternatives() {
    let err = resolve_store_provider(&StoreProviderConfig::new("etcd")).unwrap_err();
    assert!(err.contains("Unknown store provider 'etcd'"));
    assert!(err.contains("Available providers"));
}

#[cfg(feature = "store-memory")]
#[test]
fn test_resolve_memory_provider() {
    let provider = resolve_store_provider(&StoreProviderConfig::new("memory")).unwrap();
    assert_eq!(provider.provider_name(), "memory");
}

#[cfg(feature = "store-redis")]
#[test]
fn test_resolve_redis_provider_is_lazy() {
    // Nothing listens on this port; resolution must still succeed.
    let config = StoreProviderConfig::new("redis")
        .with_uri("redis://127.0.0.1:1")
        .with_connect_timeout_ms(100);
    let provider = resolve_store_provider(&config).unwrap();
    assert_eq!(provider.provider_name(), "redis");
}

#[cfg(feature = "store-redis")]
#[test]
fn test_resolve_redis_provider_rejects_bad_uri() {
    let config = StoreProviderConfig::new("redis").with_uri("not-a-uri");
    let err = resolve_store_provider(&config).unwrap_err();
    assert!(err.contains("Failed to create Redis provider"));
}
