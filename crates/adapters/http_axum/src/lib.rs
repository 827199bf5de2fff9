//! # gridgate-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the chart endpoints, both the query-string form
//!   (`/data/chart/{location}/?last=&year=&month=&day=`) and the path forms
//!   (`/{location}/data/chart/{last,year,month,day}/all/…`)
//! - Validate locations and numeric ranges before anything is dispatched
//! - Map application results into JSON responses, passing backend payloads
//!   through untouched
//!
//! ## Dependency rule
//! Depends on `gridgate-app` (for the port trait and `ChartService`) and
//! `gridgate-domain` (for the types used in request/response mapping). Never
//! leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
