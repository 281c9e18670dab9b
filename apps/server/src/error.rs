//! # API Error Type
//!
//! Unified error type for all route handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in DeliveryPro                        │
//! │                                                                     │
//! │  Handler returns Result<Json<T>, ApiError>                          │
//! │         │                                                           │
//! │         ▼                                                           │
//! │  CoreError / ImageError ──► ApiError { code, message }              │
//! │         │                                                           │
//! │         ▼                                                           │
//! │  IntoResponse: HTTP status from the code + JSON body                │
//! │                                                                     │
//! │  Frontend:                                                          │
//! │  catch (e) { e.code === 'VALIDATION_ERROR' ? showForm(e.message)    │
//! │            : showToast(e.message) }                                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both a machine-readable `code` and a human-readable `message` are
//! serialized, so the frontend can branch without string matching.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use deliverypro_core::CoreError;

use crate::services::images::ImageError;

/// API error returned from route handlers.
///
/// ## Serialization
/// ```json
/// { "code": "NOT_FOUND", "message": "Product not found: 42" }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Cart operation failed (422)
    CartError,

    /// Checkout cannot proceed (422)
    CheckoutError,

    /// Business rule violation, e.g. an illegal order-status move (422)
    BusinessLogic,

    /// A conflicting operation is already running (409)
    Conflict,

    /// The simulated order backend failed (502)
    SubmissionError,

    /// The image gateway failed (502)
    UpstreamError,

    /// The image gateway rate limit was hit (429)
    RateLimited,

    /// The image gateway credits are exhausted (402)
    OutOfCredits,

    /// A required external dependency is not configured (503)
    ServiceUnavailable,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    const fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::CartError | ErrorCode::CheckoutError | ErrorCode::BusinessLogic => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::SubmissionError | ErrorCode::UpstreamError => StatusCode::BAD_GATEWAY,
            ErrorCode::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ErrorCode::OutOfCredits => StatusCode::PAYMENT_REQUIRED,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a service-unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ServiceUnavailable, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match &err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", id),
            CoreError::OrderNotFound(id) => ApiError::not_found("Order", id),
            CoreError::ProductUnavailable(_)
            | CoreError::CartTooLarge { .. }
            | CoreError::QuantityTooLarge { .. } => {
                ApiError::new(ErrorCode::CartError, err.to_string())
            }
            CoreError::EmptyCart => ApiError::new(ErrorCode::CheckoutError, err.to_string()),
            CoreError::InvalidStep(_) => ApiError::validation(err.to_string()),
            CoreError::SubmissionInFlight => ApiError::new(ErrorCode::Conflict, err.to_string()),
            CoreError::InvalidStatusTransition { .. } => {
                ApiError::new(ErrorCode::BusinessLogic, err.to_string())
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
            CoreError::Submission(e) => ApiError::new(ErrorCode::SubmissionError, e.to_string()),
        }
    }
}

/// Converts image gateway errors to API errors.
impl From<ImageError> for ApiError {
    fn from(err: ImageError) -> Self {
        match &err {
            ImageError::RateLimited => ApiError::new(
                ErrorCode::RateLimited,
                "Image generation rate limit exceeded, try again later",
            ),
            ImageError::OutOfCredits => ApiError::new(
                ErrorCode::OutOfCredits,
                "Image generation credits exhausted",
            ),
            ImageError::NoImage => {
                ApiError::new(ErrorCode::UpstreamError, "No image was generated")
            }
            ImageError::Upstream(_) | ImageError::Request(_) => {
                // Log the upstream detail, return a generic message
                tracing::error!(error = %err, "image gateway call failed");
                ApiError::new(ErrorCode::UpstreamError, "Image generation failed")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use deliverypro_core::ValidationError;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ErrorCode::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::Conflict.status(), StatusCode::CONFLICT);
        assert_eq!(ErrorCode::RateLimited.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(ErrorCode::OutOfCredits.status(), StatusCode::PAYMENT_REQUIRED);
    }

    #[test]
    fn test_core_error_conversion() {
        let err: ApiError = CoreError::SubmissionInFlight.into();
        assert_eq!(err.code, ErrorCode::Conflict);

        let err: ApiError = CoreError::Validation(ValidationError::Required {
            field: "email".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("email"));
    }
}
