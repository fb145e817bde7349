//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Timestamps serialize as RFC 3339 text.

pub mod check_code;
pub mod health;
pub mod link;
pub mod shorten;
