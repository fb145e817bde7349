//! Target URL validation.
//!
//! The stored `original_url` is the caller's text after trimming; validation
//! only decides whether that text is an acceptable redirect target.

use url::Url;

/// Reasons a URL is rejected as a redirect target.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,

    #[error("URL contains control characters")]
    ControlCharacter,
}

/// Checks that `input` is an absolute `http`/`https` URL with a host.
///
/// Rejects potentially dangerous schemes like `javascript:`, `data:` and `file:`.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for malformed or relative URLs,
/// [`UrlValidationError::UnsupportedProtocol`] for non-HTTP(S) schemes and
/// [`UrlValidationError::MissingHost`] when the authority is empty and
/// [`UrlValidationError::ControlCharacter`] for text that is not a valid
/// `Location` header value. Checked on the raw input since the parser drops
/// tabs and newlines.
pub fn validate_url(input: &str) -> Result<(), UrlValidationError> {
    if input.chars().any(char::is_control) {
        return Err(UrlValidationError::ControlCharacter);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlValidationError::MissingHost),
    }
}
