//! Use cases
//!
//! Each service is a thin protocol over the store port: it validates the
//! caller's arguments, derives the key and issues exactly one store call.

pub mod guarded_call;
pub mod lock_service;
pub mod rate_limit_service;
pub mod stock_service;

pub use guarded_call::GuardedCall;
pub use lock_service::LockService;
pub use rate_limit_service::RateLimitService;
pub use stock_service::StockService;
