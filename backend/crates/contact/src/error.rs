//! Contact Error Types
//!
//! This module provides contact-form error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::client::ResponseFormat;
use thiserror::Error;

use crate::domain::validation::ValidationErrors;

/// Contact-specific result type alias
pub type ContactResult<T> = Result<T, ContactError>;

const DELIVERY_FAILED_MESSAGE: &str =
    "We could not send your message at this time. Please try again later.";

/// Every way a submission can be rejected.
///
/// All variants are terminal for the request; the visitor may correct
/// input, wait, or reload and try again.
#[derive(Debug, Error)]
pub enum ContactError {
    /// Anything other than POST
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Too many accepted submissions inside the cooldown window
    #[error("Rate limit exceeded (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    /// CSRF token missing or wrong
    #[error("CSRF token missing or invalid")]
    SecurityCheckFailed,

    /// One or more fields failed validation
    #[error("Validation failed for: {}", .0.fields().join(", "))]
    ValidationFailed(ValidationErrors),

    /// Mail transport reported failure
    #[error("Mail delivery failed")]
    DeliveryFailed,

    /// Session store error
    #[error("Session store error: {0}")]
    SessionStore(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ContactError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ContactError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ContactError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ContactError::SecurityCheckFailed => StatusCode::BAD_REQUEST,
            ContactError::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ContactError::DeliveryFailed
            | ContactError::SessionStore(_)
            | ContactError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContactError::MethodNotAllowed => ErrorKind::MethodNotAllowed,
            ContactError::RateLimited { .. } => ErrorKind::TooManyRequests,
            ContactError::SecurityCheckFailed => ErrorKind::BadRequest,
            ContactError::ValidationFailed(_) => ErrorKind::UnprocessableEntity,
            ContactError::DeliveryFailed
            | ContactError::SessionStore(_)
            | ContactError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Heading of the HTML status page
    pub fn title(&self) -> &'static str {
        match self {
            ContactError::MethodNotAllowed => "Method Not Allowed",
            ContactError::RateLimited { .. } => "Slow Down",
            ContactError::SecurityCheckFailed => "Security Check Failed",
            ContactError::ValidationFailed(_) => "Form Error",
            ContactError::DeliveryFailed
            | ContactError::SessionStore(_)
            | ContactError::Internal(_) => "Delivery Failed",
        }
    }

    /// Message shown to the visitor. Server faults share the generic
    /// delivery message so no internals leak.
    pub fn user_message(&self, format: ResponseFormat) -> &'static str {
        match self {
            ContactError::MethodNotAllowed => match format {
                ResponseFormat::Json => "Method not allowed",
                ResponseFormat::Html => "Please submit the form using POST.",
            },
            ContactError::RateLimited { .. } => {
                "Too many submissions. Please wait a minute and try again."
            }
            ContactError::SecurityCheckFailed => {
                "Security validation failed. Please reload the page and try again."
            }
            ContactError::ValidationFailed(_) => {
                "Please correct the highlighted fields and try again."
            }
            ContactError::DeliveryFailed
            | ContactError::SessionStore(_)
            | ContactError::Internal(_) => DELIVERY_FAILED_MESSAGE,
        }
    }

    /// Field errors, only for validation failures
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ContactError::ValidationFailed(errors) => Some(errors),
            _ => None,
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            ContactError::SessionStore(msg) => {
                tracing::error!(message = %msg, "Contact session store error");
            }
            ContactError::Internal(msg) => {
                tracing::error!(message = %msg, "Contact internal error");
            }
            ContactError::DeliveryFailed => {
                tracing::error!("Contact mail delivery failed");
            }
            ContactError::RateLimited { retry_after_secs } => {
                tracing::warn!(retry_after_secs, "Contact rate limit exceeded");
            }
            ContactError::SecurityCheckFailed => {
                tracing::warn!("Contact CSRF check failed");
            }
            _ => {
                tracing::debug!(error = %self, "Contact error");
            }
        }
    }
}

impl From<ContactError> for AppError {
    fn from(err: ContactError) -> Self {
        let kind = err.kind();
        let message = err.user_message(ResponseFormat::Json);
        AppError::new(kind, message).with_source(err)
    }
}
