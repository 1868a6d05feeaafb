//! # kvguard
//!
//! Three coordination primitives on a shared key-value store, for services
//! running as several processes:
//!
//! - **Lock manager**: non-blocking try-lock with a TTL and token-checked release
//! - **Bounded decrement**: take N units only if N are left, so a countable
//!   resource is never oversold
//! - **Rate limiter**: fixed-window count of calls per operation and key
//!
//! The guarded-call wrapper composes them around a unit of work.
//!
//! ## Example
//!
//! ```ignore
//! use kvguard::infrastructure::{ConfigLoader, init_app};
//!
//! let context = init_app(ConfigLoader::new().load()?).await?;
//! context.stock().initialize("sku-1", 1000).await?;
//!
//! let outcome = context
//!     .guard()
//!     .with_lock("lock-key", context.default_lock_ttl(), || async {
//!         context.stock().try_consume("sku-1", 1).await
//!     })
//!     .await?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Error taxonomy, outcome value objects and the store port
//! - `application` - The primitives and the guarded-call wrapper
//! - `infrastructure` - Configuration, logging, health and the composition root
//! - `cli` - The `kvguard` command line

/// Domain layer - error taxonomy, value objects and the store port
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use kvguard_domain::*;
}

/// Application layer - use cases and the provider registry
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use kvguard_application::*;
}

/// Infrastructure layer - config, logging and composition root
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use kvguard_infrastructure::*;
}

pub mod cli;

// Re-export commonly used types at the crate root
pub use application::{GuardedCall, KeySpace, LockService, RateLimitService, StockService};
pub use domain::{Error, Result};
pub use infrastructure::{AppContext, init_app};
