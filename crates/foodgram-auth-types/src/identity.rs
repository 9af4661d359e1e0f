//! Bearer-token identity extractor.

use axum::extract::{FromRef, FromRequestParts, OptionalFromRequestParts};
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use http::header::AUTHORIZATION;
use http::request::Parts;

use foodgram_core::error::AppError;

use crate::token::TokenKeys;

/// Caller identity taken from `Authorization: Bearer <token>`.
///
/// As a plain extractor it requires a valid token (401 otherwise).
/// As `Option<Identity>` it yields `None` when no `Authorization` header is
/// sent, but still rejects a header carrying an invalid token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i32,
    pub is_staff: bool,
}

impl Identity {
    /// Whether the caller may modify a resource owned by `owner_id`.
    pub fn can_modify(&self, owner_id: i32) -> bool {
        self.is_staff || self.user_id == owner_id
    }
}

fn authenticate(parts: &Parts, keys: &TokenKeys) -> Result<Option<Identity>, AppError> {
    if !parts.headers.contains_key(AUTHORIZATION) {
        return Ok(None);
    }
    let Authorization(bearer) = parts
        .headers
        .typed_get::<Authorization<Bearer>>()
        .ok_or(AppError::Unauthorized)?;
    let info = keys.validate(bearer.token()).map_err(|e| {
        tracing::debug!(error = %e, "rejected bearer token");
        AppError::Unauthorized
    })?;
    Ok(Some(Identity {
        user_id: info.user_id,
        is_staff: info.is_staff,
    }))
}

impl<S> FromRequestParts<S> for Identity
where
    TokenKeys: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    // Extract synchronously and return a 'static future so the returned
    // future does not borrow `parts` or `state`.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = authenticate(parts, &TokenKeys::from_ref(state))
            .and_then(|identity| identity.ok_or(AppError::Unauthorized));
        async move { result }
    }
}

impl<S> OptionalFromRequestParts<S> for Identity
where
    TokenKeys: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Option<Self>, Self::Rejection>> + Send {
        let result = authenticate(parts, &TokenKeys::from_ref(state));
        async move { result }
    }
}
