//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! - [`persistence`] - Link storage backends

pub mod persistence;
