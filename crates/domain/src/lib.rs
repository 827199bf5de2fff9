//! # gridgate-domain
//!
//! Pure domain model for the gridgate chart gateway.
//!
//! ## Responsibilities
//! - Define **Sites** (the four power plants) and **Locations** (a site or the
//!   `ALL` wildcard)
//! - Define **Addresses** of the per-site chart servers
//! - Define **Time selectors** and translate them into canonical
//!   **backend paths**
//! - Define **Outcomes**: what a site call produced, and how a single or
//!   fanned-out result is rendered as JSON
//! - Own the error taxonomy and the boundary range checks
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or IO crates.

pub mod address;
pub mod error;
pub mod location;
pub mod outcome;
pub mod selector;
