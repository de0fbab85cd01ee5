//! API request and response types

use serde::{Deserialize, Serialize};

/// Request to pick one of the offered buttons
#[derive(Debug, Deserialize)]
pub struct OptionRequest {
    pub index: usize,
}

/// Request to submit free text
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

/// Response for an accepted user action
#[derive(Debug, Serialize)]
pub struct QueuedResponse {
    pub queued: bool,
}

/// Generic success response
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
