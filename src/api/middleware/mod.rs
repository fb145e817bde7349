//! HTTP middleware for request processing.
//!
//! Provides request spans and the per-request access log.

pub mod access_log;
pub mod tracing;
