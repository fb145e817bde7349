//! Repository trait definitions for the domain layer.
//!
//! The service never talks to a database directly; it is handed an
//! implementation of [`LinkRepository`] at startup.
//!
//! - Implementations live in `crate::infrastructure::persistence`
//! - A mock is generated via `mockall` for service tests
//!
//! See integration tests in `tests/repository_link.rs` for usage examples.

pub mod link_repository;

pub use link_repository::LinkRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
