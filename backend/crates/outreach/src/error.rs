//! Outreach Error Types
//!
//! Outreach-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Outreach-specific result type alias
pub type OutreachResult<T> = Result<T, OutreachError>;

#[derive(Debug, Error)]
pub enum OutreachError {
    /// Submitted data failed validation
    #[error("{0}")]
    Validation(String),

    #[error("Donation not found")]
    DonationNotFound,

    #[error("Inquiry not found")]
    InquiryNotFound,

    #[error("Testimonial not found")]
    TestimonialNotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl OutreachError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            OutreachError::Validation(_) => StatusCode::BAD_REQUEST,
            OutreachError::DonationNotFound
            | OutreachError::InquiryNotFound
            | OutreachError::TestimonialNotFound => StatusCode::NOT_FOUND,
            OutreachError::Database(_) | OutreachError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            OutreachError::Validation(_) => ErrorKind::BadRequest,
            OutreachError::DonationNotFound
            | OutreachError::InquiryNotFound
            | OutreachError::TestimonialNotFound => ErrorKind::NotFound,
            OutreachError::Database(_) | OutreachError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError. Server-side details stay in the logs.
    pub fn to_app_error(&self) -> AppError {
        match self {
            OutreachError::Database(_) | OutreachError::Internal(_) => {
                AppError::new(self.kind(), "Something went wrong. Please try again later.")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            OutreachError::Database(e) => {
                tracing::error!(error = %e, "Outreach database error");
            }
            OutreachError::Internal(msg) => {
                tracing::error!(message = %msg, "Outreach internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Outreach error");
            }
        }
    }
}

impl IntoResponse for OutreachError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<JsonRejection> for OutreachError {
    fn from(rejection: JsonRejection) -> Self {
        OutreachError::Validation(rejection.body_text())
    }
}

impl From<AppError> for OutreachError {
    fn from(err: AppError) -> Self {
        if err.kind() == ErrorKind::BadRequest {
            OutreachError::Validation(err.message().to_string())
        } else {
            OutreachError::Internal(err.to_string())
        }
    }
}

impl From<OutreachError> for AppError {
    fn from(err: OutreachError) -> Self {
        err.to_app_error()
    }
}
