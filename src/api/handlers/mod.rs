//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod check_code;
pub mod health;
pub mod lookup;
pub mod redirect;
pub mod shorten;

pub use check_code::check_code_handler;
pub use health::health_handler;
pub use lookup::{recent_handler, stats_handler, url_info_handler};
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
