//! Common error types used across the workspace.
//!
//! [`ValidationError`] rejects a request before any backend is called.
//! [`BackendError`] describes one failed site call. It never reaches the
//! caller as an error status: the call site folds it into a
//! [`SiteOutcome`](crate::outcome::SiteOutcome).

use crate::location::Site;

/// Boxed source error carried by backend failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Input rejected at the request boundary.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unknown location: {0}")]
    UnknownLocation(String),

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// No usable combination of `last`/`year`/`month`/`day`.
    #[error("Invalid parameters")]
    InvalidSelector,
}

/// Failure of a single call to a site's chart server.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("no address configured for {site}")]
    UnresolvedAddress { site: Site },

    #[error("invalid backend url: {url}")]
    InvalidUrl {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("{status} returned by {url}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: BoxError,
    },

    /// The task running the call ended abnormally.
    #[error("call to {site} aborted")]
    Aborted { site: Site },
}
