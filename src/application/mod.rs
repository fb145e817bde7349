//! Application layer services implementing business logic.
//!
//! Services consume repository traits and give HTTP handlers and the admin
//! CLI a storage-agnostic API.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation, resolution and lookup

pub mod services;
