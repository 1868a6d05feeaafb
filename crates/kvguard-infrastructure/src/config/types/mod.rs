//! Configuration types

pub mod app;
pub mod lock;
pub mod logging;
pub mod rate_limit;
pub mod stock;
pub mod store;

pub use app::AppConfig;
pub use lock::LockConfig;
pub use logging::LoggingConfig;
pub use rate_limit::RateLimitConfig;
pub use stock::StockConfig;
pub use store::StoreConfig;
