//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from common error types to [`AppError`].

use super::app_error::AppError;
use super::kind::ErrorKind;

// ============================================================================
// Standard library conversions
// ============================================================================

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::Forbidden,
            std::io::ErrorKind::TimedOut => ErrorKind::RequestTimeout,
            _ => ErrorKind::InternalServerError,
        };
        AppError::new(kind, "I/O operation failed").with_source(err)
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::bad_request("Invalid integer format").with_source(err)
    }
}

// ============================================================================
// serde_json conversions
// ============================================================================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() {
            AppError::bad_request(format!("JSON parse error: {}", err)).with_source(err)
        } else {
            AppError::internal("JSON serialization error").with_source(err)
        }
    }
}

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// Name of the unique constraint a write tripped over, if that is what failed.
///
/// Repositories use this to tell "someone else took this registration
/// number" apart from every other database failure.
#[cfg(feature = "sqlx")]
pub fn unique_violation_constraint(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            Some(db_err.constraint().unwrap_or_default())
        }
        _ => None,
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::not_found("Record not found").with_source(err),
            sqlx::Error::PoolTimedOut => {
                AppError::service_unavailable("Database connection pool exhausted").with_source(err)
            }
            sqlx::Error::Database(db_err) => {
                // https://www.postgresql.org/docs/current/errcodes-appendix.html
                let app_err = match db_err.code().as_deref() {
                    // Class 23: Integrity Constraint Violation
                    Some("23505") => AppError::conflict("Duplicate key value"),
                    Some("23503") => AppError::conflict("Foreign key violation"),
                    Some("23502") => AppError::bad_request("Required field is null"),
                    Some("23514") => AppError::bad_request("Check constraint violation"),
                    // Class 40: Transaction Rollback
                    Some("40001") | Some("40P01") => {
                        AppError::service_unavailable("Database transaction conflict")
                    }
                    // Class 53: Insufficient Resources, Class 57: Operator Intervention
                    Some("53000" | "53100" | "53200" | "53300") => {
                        AppError::service_unavailable("Database resource exhausted")
                    }
                    Some("57000" | "57014" | "57P01" | "57P02" | "57P03") => {
                        AppError::service_unavailable("Database unavailable")
                    }
                    _ => AppError::internal("Database error"),
                };
                app_err.with_source(err)
            }
            sqlx::Error::Io(_) => {
                AppError::service_unavailable("Database connection error").with_source(err)
            }
            _ => AppError::internal("Database error").with_source(err),
        }
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details; sources stay in the logs
        let mut body = serde_json::json!({
            "type": "about:blank",
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
        });
        if let Some(action) = self.action() {
            body["action"] = serde_json::Value::from(action);
        }

        (
            status,
            [(http::header::CONTENT_TYPE, "application/problem+json")],
            Json(body),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let app_err: AppError = io_err.into();
        assert_eq!(app_err.kind(), ErrorKind::NotFound);

        let io_err = std::io::Error::new(std::io::ErrorKind::TimedOut, "slow");
        let app_err: AppError = io_err.into();
        assert_eq!(app_err.kind(), ErrorKind::RequestTimeout);
    }

    #[test]
    fn test_parse_int_error_conversion() {
        let parse_err = "abc".parse::<i32>().unwrap_err();
        let app_err: AppError = parse_err.into();
        assert_eq!(app_err.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let app_err: AppError = json_err.into();
        assert_eq!(app_err.kind(), ErrorKind::BadRequest);
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_row_not_found_is_not_a_unique_violation() {
        let err = sqlx::Error::RowNotFound;
        assert!(unique_violation_constraint(&err).is_none());
        let app_err: AppError = err.into();
        assert_eq!(app_err.kind(), ErrorKind::NotFound);
    }
}
