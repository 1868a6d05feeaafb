//! Error handling types
//!
//! Three kinds of failure are kept apart:
//!
//! - **Contract violations** (`InvalidArgument`): the caller passed something
//!   the primitives refuse to send to the store.
//! - **Store failures** (`Store`): the store was unreachable or a script
//!   failed. Never reported as a rejection.
//! - **Rejections** (`LockBusy`, `RateLimited`, `Insufficient`): routine
//!   admission outcomes. The primitives return them as typed values; these
//!   variants only appear when a caller converts an outcome with `into_result`.

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for kvguard
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Store transport or script execution error
    #[error("Store error: {message}")]
    Store {
        /// Description of the store error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The named lock is held by another owner
    #[error("Lock busy: {name}")]
    LockBusy {
        /// Lock name
        name: String,
    },

    /// The caller exceeded the rate limit of an operation
    #[error("Rate limited: {operation} for {key}")]
    RateLimited {
        /// Rate limited operation
        operation: String,
        /// Caller-defined resource key
        key: String,
    },

    /// Not enough quantity left for the requested decrement
    #[error("Insufficient quantity of {resource}: requested {requested}")]
    Insufficient {
        /// Resource identifier
        resource: String,
        /// Requested amount
        requested: i64,
    },

    /// I/O operation error
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Basic error creation methods
impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// Store error creation methods
impl Error {
    /// Create a store error
    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store {
            message: message.into(),
            source: None,
        }
    }

    /// Create a store error with source
    pub fn store_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Store {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Classification
impl Error {
    /// True for routine admission outcomes (busy, rate limited, insufficient)
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::LockBusy { .. } | Self::RateLimited { .. } | Self::Insufficient { .. }
        )
    }

    /// True when the store could not be reached or a script failed
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Store { .. })
    }

    /// True for caller programming errors detected before any store call
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}
