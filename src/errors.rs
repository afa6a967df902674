use std::fmt;

use crate::config::ConfigError;

/// Coarse classification of a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// Connection could not be established (DNS, refused, TLS handshake)
    Connect,
    /// Configured timeout elapsed
    Timeout,
    /// Redirect loop or too many redirects
    Redirect,
    /// Connection dropped while reading the body
    Body,
    /// Request could not be sent
    Request,
    Other,
}

impl TransportKind {
    pub fn classify(e: &reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportKind::Timeout
        } else if e.is_connect() {
            TransportKind::Connect
        } else if e.is_redirect() {
            TransportKind::Redirect
        } else if e.is_body() || e.is_decode() {
            TransportKind::Body
        } else if e.is_request() {
            TransportKind::Request
        } else {
            TransportKind::Other
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::Connect => write!(f, "connect"),
            TransportKind::Timeout => write!(f, "timeout"),
            TransportKind::Redirect => write!(f, "redirect"),
            TransportKind::Body => write!(f, "body"),
            TransportKind::Request => write!(f, "request"),
            TransportKind::Other => write!(f, "other"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Malformed URI {uri:?}: {reason}")]
    MalformedUri { uri: String, reason: String },

    #[error("Transport error ({kind}): {source}")]
    Transport {
        kind: TransportKind,
        #[source]
        source: reqwest::Error,
    },

    #[error("Fetch interrupted: {0}")]
    Interrupted(String),

    #[error("Invalid fetcher configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot start fetcher: {0}")]
    Runtime(#[from] std::io::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(source: reqwest::Error) -> Self {
        FetchError::Transport {
            kind: TransportKind::classify(&source),
            source,
        }
    }
}

impl FetchError {
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport { .. })
    }

    pub fn transport_kind(&self) -> Option<TransportKind> {
        match self {
            FetchError::Transport { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
