use std::sync::Arc;

use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use tokio::task::{JoinError, JoinHandle};

use crate::config::FetcherConfig;
use crate::errors::FetchError;
use crate::net::{build_client, fetch, RequestDescriptor, RequestId, ResponseResult};

/// Outcome of a single exchange, as returned by [`Fetcher::fetch_sync`] and
/// handed to the continuation of [`Fetcher::fetch_async`].
pub type FetchOutcome = Result<ResponseResult, FetchError>;

/// Executes GET requests, either blocking or with a completion continuation.
///
/// The fetcher owns a multi-threaded tokio runtime on which all exchanges run,
/// so it can be used from plain threads. Failed requests never affect the
/// fetcher itself.
///
/// Dropping the fetcher shuts the runtime down in the background. Requests that
/// are still in flight at that point are abandoned and their continuations
/// never run.
pub struct Fetcher {
    /// Configuration the client was built with.
    config: Arc<FetcherConfig>,
    client: reqwest::Client,
    handle: Handle,
    // Only taken on drop
    runtime: Option<Runtime>,
}

impl std::fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Fetcher {
    /// Create a new fetcher.
    ///
    /// If `config` is `None`, [`FetcherConfig::default`] is used.
    ///
    /// ```
    /// # use gosub_fetch::Fetcher;
    /// let fetcher = Fetcher::new(None).unwrap();
    /// assert!(fetcher.config().timeout.is_none());
    /// ```
    pub fn new(config: Option<FetcherConfig>) -> Result<Self, FetchError> {
        let config = config.unwrap_or_default();
        config.validate()?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(config.worker_threads)
            .thread_name("gosub-fetch")
            .enable_all()
            .build()?;

        let client = build_client(&config)?;

        log::debug!(
            "fetcher started with {} worker(s), timeout {:?}",
            config.worker_threads,
            config.timeout
        );

        Ok(Self {
            config: Arc::new(config),
            client,
            handle: runtime.handle().clone(),
            runtime: Some(runtime),
        })
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Performs the request on the caller's runtime.
    pub async fn fetch(&self, req: &RequestDescriptor) -> FetchOutcome {
        fetch(&self.client, req).await
    }

    /// Performs the request and blocks the calling thread until the full
    /// response has been received.
    ///
    /// Safe to call from a continuation: on a runtime worker the wait is done
    /// through `block_in_place`, so the worker keeps serving other tasks.
    pub fn fetch_sync(&self, req: &RequestDescriptor) -> FetchOutcome {
        let client = self.client.clone();
        let id = req.id();
        let req = req.clone();

        let task = self.handle.spawn(async move { fetch(&client, &req).await });

        wait_for(task).unwrap_or_else(|e| Err(interrupted(id, e)))
    }

    /// Schedules the request and returns immediately.
    ///
    /// `on_complete` is called exactly once on a runtime thread when the
    /// exchange finishes, with either the response or the failure. It never
    /// runs inline on the caller's thread. If the exchange never completes,
    /// it is never called.
    pub fn fetch_async<F>(&self, req: &RequestDescriptor, on_complete: F) -> PendingFetch
    where
        F: FnOnce(FetchOutcome) + Send + 'static,
    {
        let client = self.client.clone();
        let id = req.id();
        let req = req.clone();

        let task = self.handle.spawn(async move {
            let outcome = fetch(&client, &req).await;
            on_complete(outcome);
        });

        PendingFetch { id, task }
    }
}

impl Drop for Fetcher {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            log::debug!("fetcher shutting down");
            runtime.shutdown_background();
        }
    }
}

/// Handle to a request scheduled with [`Fetcher::fetch_async`].
///
/// Dropping the handle does not cancel the request.
#[derive(Debug)]
pub struct PendingFetch {
    id: RequestId,
    task: JoinHandle<()>,
}

impl PendingFetch {
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// True once the continuation has run (or the request was abandoned)
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Blocks until the continuation has run.
    ///
    /// Returns [`FetchError::Interrupted`] when the continuation panicked or the
    /// fetcher was dropped before the request completed.
    pub fn join(self) -> Result<(), FetchError> {
        let PendingFetch { id, task } = self;
        wait_for(task).map_err(|e| interrupted(id, e))
    }

    /// Async counterpart of [`join`](Self::join).
    pub async fn finished(self) -> Result<(), FetchError> {
        let PendingFetch { id, task } = self;
        task.await.map_err(|e| interrupted(id, e))
    }
}

// On a multi-threaded runtime worker, hand the worker's queue off before blocking
fn wait_for<T>(task: JoinHandle<T>) -> Result<T, JoinError> {
    let wait = move || futures::executor::block_on(task);
    match Handle::try_current() {
        Ok(h) if h.runtime_flavor() == RuntimeFlavor::MultiThread => tokio::task::block_in_place(wait),
        _ => wait(),
    }
}

fn interrupted(id: RequestId, e: JoinError) -> FetchError {
    let reason = if e.is_panic() {
        "continuation panicked"
    } else {
        "fetcher shut down before the request completed"
    };
    log::warn!("fetch[{id}]: {reason}");
    FetchError::Interrupted(reason.to_string())
}
