//! reqwest adapter error types.

/// Errors raised while setting up the HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum HttpClientError {
    /// The reqwest client could not be built (TLS backend, invalid options).
    #[error("failed to build HTTP client")]
    Build(#[source] reqwest::Error),
}
