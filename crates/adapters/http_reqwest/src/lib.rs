//! # gridgate-adapter-http-reqwest
//!
//! Outbound HTTP adapter built on [reqwest](https://docs.rs/reqwest).
//!
//! ## Responsibilities
//! - Implement the `ChartBackend` port from `gridgate-app::ports`
//! - Bound every call with a timeout (connect and total)
//! - Classify failures: timeout, transport, non-2xx status, undecodable body
//!
//! No retries: one GET per call.
//!
//! ## Dependency rule
//! Depends on `gridgate-app` (for the port trait) and `gridgate-domain`
//! (for error types). The `app` and `domain` crates never reference this adapter.

mod backend;
mod error;

pub use backend::ReqwestChartBackend;
pub use error::HttpClientError;
