// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Message shown to users whenever the AI service cannot be reached.
/// ("API connection failed. Please try again in a moment.")
pub const UPSTREAM_FAILURE_MESSAGE: &str =
    "API ချိတ်ဆက်မှု အဆင်မပြေပါ။ ခဏနေမှ ပြန်ကြိုးစားပါ။";

/// Application-specific error types
/// DOCUMENTATION: Each variant maps to an HTTP status code and error response
#[derive(Error, Debug)]
pub enum GuideError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Unauthorized access to external API")]
    Unauthorized,

    #[error("External API error: {0}")]
    ExternalApiError(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

impl GuideError {
    fn code(&self) -> &'static str {
        match self {
            GuideError::InvalidInput(_) => "INVALID_INPUT",
            GuideError::ValidationError(_) => "VALIDATION_ERROR",
            GuideError::ConfigurationError(_) => "CONFIGURATION_ERROR",
            GuideError::Unauthorized => "UNAUTHORIZED",
            GuideError::ExternalApiError(_) => "EXTERNAL_API_ERROR",
            GuideError::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
        }
    }

    /// Text returned to clients. Upstream details stay in the log.
    pub fn public_message(&self) -> String {
        match self {
            GuideError::Unauthorized
            | GuideError::ExternalApiError(_)
            | GuideError::RateLimitExceeded => UPSTREAM_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

/// Convert GuideError to HTTP response
impl ResponseError for GuideError {
    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("Request failed: {}", self);
        }

        let body = json!({
            "error": {
                "code": self.code(),
                "message": self.public_message(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            GuideError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            GuideError::ValidationError(_) => StatusCode::BAD_REQUEST,
            GuideError::ConfigurationError(_) => StatusCode::SERVICE_UNAVAILABLE,
            GuideError::Unauthorized => StatusCode::BAD_GATEWAY,
            GuideError::ExternalApiError(_) => StatusCode::BAD_GATEWAY,
            GuideError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_errors_hide_details() {
        let err = GuideError::ExternalApiError("API error 500: stack trace".to_string());
        assert_eq!(err.public_message(), UPSTREAM_FAILURE_MESSAGE);
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_validation_errors_keep_details() {
        let err = GuideError::ValidationError("query must not be empty".to_string());
        assert_eq!(
            err.public_message(),
            "Validation error: query must not be empty"
        );
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
