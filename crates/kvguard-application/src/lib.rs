//! Application Layer - kvguard
//!
//! The three coordination primitives and the wrapper that composes them:
//!
//! | Use case | Description |
//! |----------|-------------|
//! | [`LockService`] | Non-blocking try-lock with token-checked release |
//! | [`StockService`] | Atomic "decrement if enough is left" for countable resources |
//! | [`RateLimitService`] | Fixed-window per-key invocation limit |
//! | [`GuardedCall`] | Runs work under a lock and/or a rate limit, releasing on every exit path |
//!
//! Every check-then-act sequence is delegated to a single store script; no
//! in-process lock or shared counter takes part in an admission decision.
//!
//! ## Dependencies
//!
//! This crate depends only on `kvguard-domain` and pure async libraries.
//! Store implementations live in `kvguard-providers` and are discovered
//! through [`ports::registry`].

pub mod keys;
pub mod ports;
pub mod use_cases;

pub use keys::KeySpace;
pub use use_cases::*;
