//! Store key derivation

use kvguard_domain::constants::{
    DEFAULT_KEY_PREFIX, LOCK_NAMESPACE, RATE_NAMESPACE, STOCK_NAMESPACE,
};
use kvguard_domain::error::{Error, Result};

/// Namespaced key builder shared by the primitives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpace {
    prefix: String,
}

impl KeySpace {
    /// Create a key space with the given prefix; an empty prefix writes bare keys
    pub fn new<S: Into<String>>(prefix: S) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Configured prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Key of a lock record
    pub fn lock(&self, name: &str) -> Result<String> {
        require("lock name", name)?;
        Ok(self.join(&[LOCK_NAMESPACE, name]))
    }

    /// Key of a countable resource record
    pub fn stock(&self, resource: &str) -> Result<String> {
        require("resource id", resource)?;
        Ok(self.join(&[STOCK_NAMESPACE, resource]))
    }

    /// Key of a rate window record for one operation and resource key
    ///
    /// The operation may not contain `:`, so the first separator after the
    /// namespace always ends it and resource keys stay free-form.
    pub fn rate(&self, operation: &str, resource_key: &str) -> Result<String> {
        require("rate limit operation", operation)?;
        if operation.contains(':') {
            return Err(Error::invalid_argument(format!(
                "rate limit operation '{operation}' cannot contain ':'"
            )));
        }
        require("rate limit key", resource_key)?;
        Ok(self.join(&[RATE_NAMESPACE, operation, resource_key]))
    }

    fn join(&self, parts: &[&str]) -> String {
        let body = parts.join(":");
        if self.prefix.is_empty() {
            body
        } else {
            format!("{}:{}", self.prefix, body)
        }
    }
}

impl Default for KeySpace {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_PREFIX)
    }
}

fn require(what: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::invalid_argument(format!("{what} cannot be empty")));
    }
    Ok(())
}
