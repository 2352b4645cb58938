//! Request Extractors

use axum::extract::FromRequest;

use crate::error::OutreachError;

/// JSON request body. Unreadable bodies become a 400 problem response
/// instead of axum's plain-text rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(OutreachError))]
pub struct JsonBody<T>(pub T);
