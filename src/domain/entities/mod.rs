//! Core domain entities.
//!
//! - [`Link`] - A stored short link with its TTL and visit counter
//! - [`NewLink`] - Input for inserting a link; computes `expires_at` once
//!
//! Entities are plain data structures; the only logic they carry is the
//! expiry arithmetic every layer must agree on.

pub mod link;

pub use link::{DEFAULT_VALIDITY_MINUTES, Link, NewLink};
