//! Utility functions for code generation, URL handling, and error classification.
//!
//! - [`code_generator`] - Short code generation and custom code validation
//! - [`url_validator`] - Redirect target validation
//! - [`host_url`] - Public base URL resolution from config or request headers
//! - [`db_error`] - Database error classification

pub mod code_generator;
pub mod db_error;
pub mod host_url;
pub mod url_validator;
