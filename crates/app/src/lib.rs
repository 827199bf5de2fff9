//! # gridgate-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **`ChartBackend` port** that outbound adapters implement to
//!   GET a JSON document from a site's chart server
//! - Hold the **address registry**: which host serves which site, fixed at
//!   startup
//! - Provide the **`ChartService`** use-case: resolve a location, call one
//!   backend or fan out to all of them concurrently, and collect the outcomes
//!   in registry order
//!
//! ## Dependency rule
//! Depends on `gridgate-domain` only (plus `tokio` for task spawning).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod registry;
pub mod services;
