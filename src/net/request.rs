//! Request descriptors.
//!
//! A [`RequestDescriptor`] is an immutable description of a single request.
//! The target is validated when the descriptor is built, so a descriptor that
//! exists always points to an absolute `http` or `https` URL with a host.

use std::fmt;
use url::Url;
use uuid::Uuid;

use crate::errors::FetchError;

/// Unique id of a request, used to correlate log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
}

impl Method {
    pub(crate) fn as_http(&self) -> http::Method {
        match self {
            Method::Get => http::Method::GET,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    id: RequestId,
    method: Method,
    target: Url,
}

impl RequestDescriptor {
    /// Describes a GET request to `target`.
    ///
    /// ```
    /// # use gosub_fetch::RequestDescriptor;
    /// let req = RequestDescriptor::get("https://example.com/stations.json").unwrap();
    /// assert_eq!(req.target().host_str(), Some("example.com"));
    ///
    /// assert!(RequestDescriptor::get("not a url").is_err());
    /// ```
    pub fn get(target: &str) -> Result<Self, FetchError> {
        Self::builder().get().uri(target).build()
    }

    pub fn builder() -> RequestDescriptorBuilder {
        RequestDescriptorBuilder::default()
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn target(&self) -> &Url {
        &self.target
    }
}

/// Builder for [`RequestDescriptor`]. The method defaults to GET.
#[derive(Debug, Clone)]
pub struct RequestDescriptorBuilder {
    method: Method,
    target: Option<String>,
}

impl Default for RequestDescriptorBuilder {
    fn default() -> Self {
        Self {
            method: Method::Get,
            target: None,
        }
    }
}

impl RequestDescriptorBuilder {
    pub fn get(mut self) -> Self {
        self.method = Method::Get;
        self
    }

    pub fn uri<S: Into<String>>(mut self, target: S) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Validate the target and build the descriptor.
    pub fn build(self) -> Result<RequestDescriptor, FetchError> {
        let raw = self.target.unwrap_or_default();
        let target = parse_target(&raw)?;

        Ok(RequestDescriptor {
            id: RequestId::new(),
            method: self.method,
            target,
        })
    }
}

fn parse_target(raw: &str) -> Result<Url, FetchError> {
    let malformed = |reason: String| FetchError::MalformedUri {
        uri: raw.to_string(),
        reason,
    };

    if raw.trim().is_empty() {
        return Err(malformed("empty target".into()));
    }

    let url = Url::parse(raw.trim()).map_err(|e| malformed(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(malformed(format!("unsupported scheme '{other}'"))),
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(malformed("missing host".into()));
    }

    Ok(url)
}
