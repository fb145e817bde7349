//! DTO for custom code availability checks.

use serde::Serialize;

use crate::application::services::CodeAvailability;

#[derive(Debug, Serialize)]
pub struct CheckCodeResponse {
    pub available: bool,
    pub message: &'static str,
}

impl From<CodeAvailability> for CheckCodeResponse {
    fn from(availability: CodeAvailability) -> Self {
        Self {
            available: availability.is_available(),
            message: availability.message(),
        }
    }
}
