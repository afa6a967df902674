//! Fetcher configuration.
//!
//! `FetcherConfig` controls how a [`Fetcher`](crate::Fetcher) talks to the
//! network: the user agent it announces, optional timeouts, redirect handling
//! and the size of the runtime that drives its requests.
//!
//! `FetcherConfig` provides defaults via [`Default`] and a fluent
//! [`FetcherConfig::builder()`] for customization with validation.
//!
//! # Examples
//!
//! ## Use defaults
//! ```rust
//! use gosub_fetch::FetcherConfig;
//! let cfg = FetcherConfig::default();
//! assert_eq!(cfg.worker_threads, 2);
//! assert!(cfg.timeout.is_none());
//! ```
//!
//! ## Customize with the builder
//! ```rust
//! use gosub_fetch::FetcherConfig;
//! use std::time::Duration;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = FetcherConfig::builder()
//!     .user_agent("Gosub/0.1")
//!     .timeout(Duration::from_secs(30))
//!     .max_redirects(0)
//!     .build()?; // returns Result<FetcherConfig, ConfigError>
//! # Ok(()) }
//! ```
//!
//! # Notes
//!
//! No timeout is applied unless one is configured. A request against a peer
//! that never answers will then wait forever.

use std::time::Duration;

const DEFAULT_USER_AGENT: &str = "Gosub/1.0 (X11; Linux x86_64) GosubFetch/1.0";

#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// User agent string sent with every request
    pub user_agent: String,
    /// Total request timeout, from connect until the body has been read
    pub timeout: Option<Duration>,
    /// Timeout for establishing the connection only
    pub connect_timeout: Option<Duration>,
    /// Maximum number of redirects to follow. 0 returns the redirect response as-is.
    pub max_redirects: usize,
    /// Number of runtime worker threads executing requests
    pub worker_threads: usize,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            connect_timeout: None,
            max_redirects: 10,
            worker_threads: 2,
        }
    }
}

impl FetcherConfig {
    pub fn builder() -> FetcherConfigBuilder {
        FetcherConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate(self)
    }
}

/// Builder for [`FetcherConfig`].
#[derive(Debug, Clone, Default)]
pub struct FetcherConfigBuilder {
    inner: FetcherConfig,
}

impl FetcherConfigBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut FetcherConfig)) -> Self {
        f(&mut self.inner);
        self
    }

    pub fn user_agent<S: Into<String>>(self, ua: S) -> Self { self.map(|c| c.user_agent = ua.into()) }
    pub fn timeout(self, d: Duration) -> Self { self.map(|c| c.timeout = Some(d)) }
    pub fn connect_timeout(self, d: Duration) -> Self { self.map(|c| c.connect_timeout = Some(d)) }
    pub fn max_redirects(self, n: usize) -> Self { self.map(|c| c.max_redirects = n) }
    pub fn worker_threads(self, n: usize) -> Self { self.map(|c| c.worker_threads = n) }

    /// Apply multiple changes in one go.
    pub fn with(self, f: impl FnOnce(&mut FetcherConfig)) -> Self { self.map(f) }

    /// Validate and build the final config.
    pub fn build(self) -> Result<FetcherConfig, ConfigError> {
        validate(&self.inner)?;
        Ok(self.inner)
    }
}

// ---------- Validation ----------

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("user_agent must not be empty")]
    EmptyUserAgent,
    #[error("{0} must be larger than zero")]
    ZeroTimeout(&'static str),
    #[error("worker_threads must be at least 1")]
    ZeroWorkers,
}

fn validate(c: &FetcherConfig) -> Result<(), ConfigError> {
    if c.user_agent.trim().is_empty() {
        return Err(ConfigError::EmptyUserAgent);
    }
    if c.timeout == Some(Duration::ZERO) {
        return Err(ConfigError::ZeroTimeout("timeout"));
    }
    if c.connect_timeout == Some(Duration::ZERO) {
        return Err(ConfigError::ZeroTimeout("connect_timeout"));
    }
    if c.worker_threads == 0 {
        return Err(ConfigError::ZeroWorkers);
    }
    Ok(())
}
