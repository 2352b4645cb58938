//! Application Error - Unified error type for the application
//!
//! Defines [`AppError`] struct and [`AppResult<T>`] type alias.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// Unified error carried to the HTTP boundary.
///
/// * `kind` - classification, maps to a status code
/// * `message` - shown to the person who filled in the form
/// * `action` - optional hint on what to do next
/// * `source` - underlying error, logged but never rendered
///
/// ## Examples
/// ```rust
/// use kernel::error::app_error::AppError;
///
/// let err = AppError::not_found("Registration ID not found")
///     .with_action("Please check and try again");
/// assert_eq!(err.status_code(), 404);
/// ```
pub struct AppError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    action: Option<Cow<'static, str>>,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

/// `Result<T, AppError>`.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: None,
            source: None,
        }
    }

    // ========================================================================
    // Convenience constructors
    // ========================================================================

    #[inline]
    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    #[inline]
    pub fn unauthorized(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    #[inline]
    pub fn forbidden(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    #[inline]
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    #[inline]
    pub fn conflict(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    #[inline]
    pub fn unprocessable(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::UnprocessableEntity, message)
    }

    #[inline]
    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InternalServerError, message)
    }

    #[inline]
    pub fn service_unavailable(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, message)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Attach a next-step hint for the user.
    #[inline]
    pub fn with_action(mut self, action: impl Into<Cow<'static, str>>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Attach the underlying error for logs.
    ///
    /// ```rust
    /// use kernel::error::app_error::{AppError, AppResult};
    ///
    /// fn parse_age(raw: &str) -> AppResult<u32> {
    ///     raw.parse()
    ///         .map_err(|e| AppError::bad_request("Age must be a number").with_source(e))
    /// }
    /// assert!(parse_age("sixty").is_err());
    /// ```
    #[inline]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    #[inline]
    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_error()
    }

    #[inline]
    pub fn is_client_error(&self) -> bool {
        self.kind.is_client_error()
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder.field("kind", &self.kind);
        builder.field("message", &self.message);
        if let Some(action) = &self.action {
            builder.field("action", action);
        }
        if let Some(source) = &self.source {
            builder.field("source", source);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(action) = &self.action {
            write!(f, " (Action: {})", action)?;
        }
        Ok(())
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

// ============================================================================
// Result extension traits
// ============================================================================

/// Wrap a foreign error into an [`AppError`] of the given kind.
pub trait ResultExt<T, E> {
    fn map_app_err(self, kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> AppResult<T>
    where
        E: Error + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn map_app_err(self, kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> AppResult<T>
    where
        E: Error + Send + Sync + 'static,
    {
        self.map_err(|e| AppError::new(kind, message).with_source(e))
    }
}

/// Turn a missing value into an [`AppError`].
pub trait OptionExt<T> {
    fn ok_or_app_err(self, kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> AppResult<T>;

    /// `None` becomes 404.
    fn ok_or_not_found(self, message: impl Into<Cow<'static, str>>) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_app_err(self, kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> AppResult<T> {
        self.ok_or_else(|| AppError::new(kind, message))
    }

    fn ok_or_not_found(self, message: impl Into<Cow<'static, str>>) -> AppResult<T> {
        self.ok_or_app_err(ErrorKind::NotFound, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_error() {
        let err = AppError::new(ErrorKind::NotFound, "Volunteer ID not found");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "Volunteer ID not found");
        assert!(err.action().is_none());
    }

    #[test]
    fn test_convenience_constructors() {
        assert_eq!(AppError::bad_request("x").status_code(), 400);
        assert_eq!(AppError::unauthorized("x").status_code(), 401);
        assert_eq!(AppError::forbidden("x").status_code(), 403);
        assert_eq!(AppError::not_found("x").status_code(), 404);
        assert_eq!(AppError::conflict("x").status_code(), 409);
        assert_eq!(AppError::unprocessable("x").status_code(), 422);
        assert_eq!(AppError::internal("x").status_code(), 500);
        assert_eq!(AppError::service_unavailable("x").status_code(), 503);
    }

    #[test]
    fn test_display_with_action() {
        let err = AppError::bad_request("Reason missing")
            .with_action("Please provide a reason for rejection.");
        assert_eq!(
            err.to_string(),
            "[Bad Request] Reason missing (Action: Please provide a reason for rejection.)"
        );
    }

    #[test]
    fn test_with_source() {
        let parse_err = "abc".parse::<u32>().unwrap_err();
        let err = AppError::bad_request("Age must be a number").with_source(parse_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_result_ext() {
        let result: Result<u32, std::num::ParseIntError> = "x".parse();
        let mapped = result.map_app_err(ErrorKind::UnprocessableEntity, "bad page");
        assert_eq!(mapped.unwrap_err().status_code(), 422);
    }

    #[test]
    fn test_option_ext() {
        let none: Option<u8> = None;
        assert_eq!(none.ok_or_not_found("gone").unwrap_err().status_code(), 404);
        assert_eq!(Some(7u8).ok_or_not_found("gone").unwrap(), 7);
    }
}
