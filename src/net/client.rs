use crate::config::FetcherConfig;
use crate::errors::FetchError;
use crate::net::{RequestDescriptor, ResponseResult};

/// Builds the HTTP client used by a fetcher.
///
/// Idle connections are never kept, so every exchange opens its own connection.
pub(crate) fn build_client(config: &FetcherConfig) -> Result<reqwest::Client, FetchError> {
    let redirects = match config.max_redirects {
        0 => reqwest::redirect::Policy::none(),
        n => reqwest::redirect::Policy::limited(n),
    };

    let mut builder = reqwest::Client::builder()
        .user_agent(config.user_agent.clone())
        .redirect(redirects)
        .pool_max_idle_per_host(0);

    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(timeout) = config.connect_timeout {
        builder = builder.connect_timeout(timeout);
    }

    builder
        .build()
        .map_err(|e| FetchError::Runtime(std::io::Error::other(e)))
}

// Executes the request and returns the fully buffered response
pub(crate) async fn fetch(client: &reqwest::Client, req: &RequestDescriptor) -> Result<ResponseResult, FetchError> {
    log::debug!("fetch[{}]: {} {}", req.id(), req.method(), req.target());

    let res = client
        .request(req.method().as_http(), req.target().clone())
        .send()
        .await
        .inspect_err(|e| log::warn!("fetch[{}]: {} failed: {}", req.id(), req.target(), e))?;

    let final_url = res.url().clone();
    let status = res.status();
    let headers = res.headers().clone();

    // Fetch body. We don't do streaming
    let body = res
        .bytes()
        .await
        .inspect_err(|e| log::warn!("fetch[{}]: reading body of {} failed: {}", req.id(), final_url, e))?;

    log::debug!("fetch[{}]: {} -> {} ({} bytes)", req.id(), final_url, status.as_u16(), body.len());

    Ok(ResponseResult::new(final_url, status, headers, &body))
}
