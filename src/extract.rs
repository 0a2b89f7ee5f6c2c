//! Request extractors.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` with rejections reported as [`AppError::InvalidRequest`],
/// so malformed bodies get the same JSON error shape as everything else.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
