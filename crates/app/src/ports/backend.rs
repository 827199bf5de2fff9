//! Backend port: fetching chart documents from site servers.

use std::future::Future;

use gridgate_domain::error::BackendError;

/// Issues a GET against a site's chart server and decodes the JSON body.
///
/// Implementations must not retry and must bound the call with a timeout.
/// Every failure, including a non-2xx status or a body that is not JSON,
/// is reported as a [`BackendError`].
pub trait ChartBackend {
    /// Fetch and decode the JSON document at `url`.
    fn fetch(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<serde_json::Value, BackendError>> + Send;
}

impl<T: ChartBackend + Send + Sync> ChartBackend for std::sync::Arc<T> {
    fn fetch(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<serde_json::Value, BackendError>> + Send {
        (**self).fetch(url)
    }
}
