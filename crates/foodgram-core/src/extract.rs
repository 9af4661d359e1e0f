use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// `axum::Json` whose rejection is a 400 [`AppError::BadRequest`] JSON body
/// instead of axum's plain-text 415/422 responses.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Query-string extractor that accepts repeated keys (`?tags=a&tags=b`) into
/// a `Vec` field and rejects malformed input with a 400 JSON body.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum_extra::extract::Query), rejection(AppError))]
pub struct QueryParams<T>(pub T);

/// `axum::extract::Path` rejecting unparseable segments (`/recipes/abc/`)
/// with a 400 JSON body.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct PathParam<T>(pub T);
