//! Request extractors
//!
//! `axum::Json` rejects malformed bodies with a plain-text response;
//! [`ApiJson`] routes that rejection through [`AppError`] so clients always
//! get the `{error, message}` shape.

use crate::error::AppError;
use axum::extract::FromRequest;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
