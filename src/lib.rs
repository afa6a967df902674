//! Minimal HTTP GET fetcher with a blocking and a continuation-based calling
//! convention.
//!
//! ```no_run
//! use gosub_fetch::{Fetcher, RequestDescriptor};
//!
//! # fn main() -> Result<(), gosub_fetch::FetchError> {
//! let fetcher = Fetcher::new(None)?;
//! let req = RequestDescriptor::get("https://example.com/")?;
//!
//! let resp = fetcher.fetch_sync(&req)?;
//! println!("sync: {}", resp.status);
//!
//! fetcher
//!     .fetch_async(&req, |outcome| match outcome {
//!         Ok(resp) => println!("async: {}", resp.status),
//!         Err(e) => eprintln!("async failed: {e}"),
//!     })
//!     .join()?;
//! # Ok(()) }
//! ```

pub mod config;
pub mod errors;
pub mod fetcher;
pub mod net;

pub use config::{ConfigError, FetcherConfig, FetcherConfigBuilder};
pub use errors::{FetchError, TransportKind};
pub use fetcher::{FetchOutcome, Fetcher, PendingFetch};
pub use net::{Method, RequestDescriptor, RequestId, ResponseResult};
