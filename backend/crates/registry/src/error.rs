//! Registry Error Types
//!
//! Registry-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_object::registration_number::RegistrationKind;

/// Registry-specific result type alias
pub type RegistryResult<T> = Result<T, RegistryError>;

#[derive(Debug, Error)]
pub enum RegistryError {
    /// Submitted data failed validation
    #[error("{0}")]
    Validation(String),

    #[error("Please provide a reason for rejection.")]
    RejectionReasonRequired,

    /// Public status lookup by elder registration number
    #[error("Registration ID not found. Please check and try again.")]
    ElderNotFound,

    /// Public status lookup by volunteer number
    #[error("Volunteer ID not found. Please check and try again.")]
    VolunteerNotFound,

    /// Staff lookup by internal id
    #[error("Registration not found")]
    RecordNotFound,

    /// ID cards exist only for approved registrations
    #[error("ID card can only be generated for approved {}s.", .0)]
    NotApproved(RegistrationKind),

    /// The store already holds this registration number.
    ///
    /// Raised by repositories on a unique violation of the number column.
    /// Registration use cases recount and retry on it.
    #[error("Registration number {0} is already taken")]
    DuplicateRegistrationNumber(String),

    /// Every allocation attempt lost a race
    #[error("Could not allocate a {kind} registration number after {attempts} attempts")]
    AllocationContention {
        kind: RegistrationKind,
        attempts: u32,
    },

    #[error("ID card rendering failed: {0}")]
    IdCardRendering(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RegistryError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RegistryError::Validation(_) | RegistryError::RejectionReasonRequired => {
                StatusCode::BAD_REQUEST
            }
            RegistryError::ElderNotFound
            | RegistryError::VolunteerNotFound
            | RegistryError::RecordNotFound => StatusCode::NOT_FOUND,
            RegistryError::NotApproved(_) | RegistryError::DuplicateRegistrationNumber(_) => {
                StatusCode::CONFLICT
            }
            RegistryError::AllocationContention { .. } => StatusCode::SERVICE_UNAVAILABLE,
            RegistryError::IdCardRendering(_)
            | RegistryError::Database(_)
            | RegistryError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::Validation(_) | RegistryError::RejectionReasonRequired => {
                ErrorKind::BadRequest
            }
            RegistryError::ElderNotFound
            | RegistryError::VolunteerNotFound
            | RegistryError::RecordNotFound => ErrorKind::NotFound,
            RegistryError::NotApproved(_) | RegistryError::DuplicateRegistrationNumber(_) => {
                ErrorKind::Conflict
            }
            RegistryError::AllocationContention { .. } => ErrorKind::ServiceUnavailable,
            RegistryError::IdCardRendering(_)
            | RegistryError::Database(_)
            | RegistryError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError. Server-side details stay in the logs.
    pub fn to_app_error(&self) -> AppError {
        match self {
            RegistryError::Database(_)
            | RegistryError::Internal(_)
            | RegistryError::IdCardRendering(_) => {
                AppError::new(self.kind(), "Something went wrong. Please try again later.")
            }
            RegistryError::AllocationContention { .. } => AppError::new(
                self.kind(),
                "Registration is busy right now. Please try again.",
            )
            .with_action("Retry the submission in a few seconds"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            RegistryError::Database(e) => {
                tracing::error!(error = %e, "Registry database error");
            }
            RegistryError::Internal(msg) => {
                tracing::error!(message = %msg, "Registry internal error");
            }
            RegistryError::IdCardRendering(msg) => {
                tracing::error!(message = %msg, "ID card rendering failed");
            }
            RegistryError::AllocationContention { kind, attempts } => {
                tracing::warn!(%kind, attempts, "Registration number allocation exhausted retries");
            }
            RegistryError::DuplicateRegistrationNumber(number) => {
                tracing::warn!(registration_number = %number, "Duplicate registration number escaped retry");
            }
            _ => {
                tracing::debug!(error = %self, "Registry error");
            }
        }
    }
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<JsonRejection> for RegistryError {
    fn from(rejection: JsonRejection) -> Self {
        RegistryError::Validation(rejection.body_text())
    }
}

impl From<AppError> for RegistryError {
    fn from(err: AppError) -> Self {
        if err.kind() == ErrorKind::BadRequest {
            RegistryError::Validation(err.message().to_string())
        } else {
            RegistryError::Internal(err.to_string())
        }
    }
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        err.to_app_error()
    }
}
