//! Configuration for the retrieval router.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RetrievalError};

/// Configuration parameters for the [`RetrievalRouter`](crate::RetrievalRouter).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouterConfig {
    /// Cap on the number of receipts a structured query returns.
    pub max_results: usize,
    /// Default number of results for semantic search when the caller
    /// does not specify one.
    pub default_top_k: usize,
    /// Bound on each embedding call.
    pub embed_timeout: Duration,
    /// Pause before the single retry of a failed embedding call.
    pub retry_backoff: Duration,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_results: 50,
            default_top_k: 5,
            embed_timeout: Duration::from_secs(15),
            retry_backoff: Duration::from_millis(500),
        }
    }
}

impl RouterConfig {
    /// Create a new builder for constructing a [`RouterConfig`].
    pub fn builder() -> RouterConfigBuilder {
        RouterConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`RouterConfig`].
#[derive(Debug, Clone, Default)]
pub struct RouterConfigBuilder {
    config: RouterConfig,
}

impl RouterConfigBuilder {
    /// Set the structured-query result cap.
    pub fn max_results(mut self, max: usize) -> Self {
        self.config.max_results = max;
        self
    }

    /// Set the default semantic-search result count.
    pub fn default_top_k(mut self, k: usize) -> Self {
        self.config.default_top_k = k;
        self
    }

    /// Set the bound on each embedding call.
    pub fn embed_timeout(mut self, timeout: Duration) -> Self {
        self.config.embed_timeout = timeout;
        self
    }

    /// Set the pause before the retry of a failed embedding call.
    pub fn retry_backoff(mut self, backoff: Duration) -> Self {
        self.config.retry_backoff = backoff;
        self
    }

    /// Build the [`RouterConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::Config`] if:
    /// - `max_results == 0`
    /// - `default_top_k == 0`
    /// - `embed_timeout` is zero
    pub fn build(self) -> Result<RouterConfig> {
        if self.config.max_results == 0 {
            return Err(RetrievalError::Config("max_results must be greater than zero".into()));
        }
        if self.config.default_top_k == 0 {
            return Err(RetrievalError::Config("default_top_k must be greater than zero".into()));
        }
        if self.config.embed_timeout.is_zero() {
            return Err(RetrievalError::Config("embed_timeout must be non-zero".into()));
        }
        Ok(self.config)
    }
}
