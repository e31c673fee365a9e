use axum::extract::FromRequest;

use crate::error::AttendanceServiceError;

/// `Json` whose rejection is rendered as an [`AttendanceServiceError::InvalidBody`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AttendanceServiceError))]
pub struct JsonBody<T>(pub T);
