//! Error types for the REST client.
//!
//! # Design
//! HTTP error statuses are not errors here: a 404 or 500 comes back as a
//! `RestResponse` with `success == false`. `RestError` covers everything that
//! prevents a response from existing at all: a request that cannot be built,
//! a transport that cannot be constructed, or a network failure.
//!
//! Transport failures are classified into `Timeout` and `Connection` where
//! the underlying library says so; the rest are kept opaque in `Transport`
//! so `ureq` and `reqwest` types never leak into the public API.
//!
//! A rejected TLS handshake is `Tls` from both transports. Both sit on
//! rustls, so the classification looks for a `rustls::Error` in the source
//! chain instead of trusting each library's own error kinds.

use std::error::Error as StdError;

use thiserror::Error;

/// Errors returned by `RestClient` operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RestError {
    /// The endpoint is not an absolute URL.
    #[error("invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// A header entity has a name or value that cannot go on the wire.
    #[error("invalid header {name:?}: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// The media type string does not parse.
    #[error("invalid media type {0:?}")]
    InvalidMediaType(String),

    /// The request body could not be encoded for the requested media type.
    #[error("cannot encode body as {media_type}: {reason}")]
    Serialization { media_type: String, reason: String },

    /// The response body could not be decoded into the requested type.
    #[error("cannot decode response body: {0}")]
    Deserialization(String),

    /// The connect or read phase exceeded its timeout.
    #[error("request timed out")]
    Timeout,

    /// The connection to the remote host could not be established.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The TLS handshake failed, usually because the peer certificate is
    /// not trusted. Development mode skips the check that causes this.
    #[error("tls handshake failed: {0}")]
    Tls(String),

    /// Any other transport failure, with the underlying error as source.
    #[error("transport error")]
    Transport(#[source] Box<dyn StdError + Send + Sync + 'static>),

    /// The underlying HTTP client could not be constructed.
    #[error("cannot generate client: {0}")]
    ClientBuild(String),

    /// An async request was issued outside a tokio runtime.
    #[error("async requests require a running tokio runtime")]
    NoRuntime,

    /// The async handle was closed, or already reported its failure.
    #[error("async response handle is closed")]
    Closed,

    /// The task driving an async request panicked.
    #[error("async request task failed: {0}")]
    TaskFailed(String),

    /// A configuration value is missing or out of range.
    #[error("invalid configuration for {field}: {reason}")]
    Config { field: &'static str, reason: String },
}

/// Result alias used throughout the crate.
pub type Result<T, E = RestError> = std::result::Result<T, E>;

impl RestError {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        RestError::Config {
            field,
            reason: reason.into(),
        }
    }

    /// Whether the failure happened on the network rather than while
    /// building the request.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            RestError::Timeout
                | RestError::Connection(_)
                | RestError::Tls(_)
                | RestError::Transport(_)
        )
    }
}

/// Finds a rustls failure anywhere in the source chain. `io::Error` hides
/// its payload from `source()`, so it is unwrapped through `get_ref`.
fn tls_failure(err: &(dyn StdError + 'static)) -> Option<String> {
    let mut current = Some(err);
    while let Some(err) = current {
        if let Some(tls) = err.downcast_ref::<rustls::Error>() {
            return Some(tls.to_string());
        }
        if let Some(inner) = err
            .downcast_ref::<std::io::Error>()
            .and_then(std::io::Error::get_ref)
        {
            if let Some(reason) = tls_failure(inner) {
                return Some(reason);
            }
        }
        current = err.source();
    }
    None
}

impl From<ureq::Error> for RestError {
    fn from(err: ureq::Error) -> Self {
        if let Some(reason) = tls_failure(&err) {
            return RestError::Tls(reason);
        }
        match err {
            ureq::Error::Timeout(_) => RestError::Timeout,
            ureq::Error::ConnectionFailed => RestError::Connection("connection failed".to_string()),
            ureq::Error::HostNotFound => RestError::Connection("host not found".to_string()),
            ureq::Error::Io(io) => match io.kind() {
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock => RestError::Timeout,
                std::io::ErrorKind::ConnectionRefused
                | std::io::ErrorKind::ConnectionReset
                | std::io::ErrorKind::ConnectionAborted => RestError::Connection(io.to_string()),
                _ => RestError::Transport(Box::new(io)),
            },
            other => RestError::Transport(Box::new(other)),
        }
    }
}

impl From<reqwest::Error> for RestError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(reason) = tls_failure(&err) {
            RestError::Tls(reason)
        } else if err.is_timeout() {
            RestError::Timeout
        } else if err.is_connect() {
            RestError::Connection(err.to_string())
        } else if err.is_builder() {
            RestError::ClientBuild(err.to_string())
        } else {
            RestError::Transport(Box::new(err))
        }
    }
}
