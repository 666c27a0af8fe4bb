//! Request extractors shared across route handlers.
//!
//! Authentication lives in a separate surface; by the time a request reaches
//! this service it carries an opaque, stable user identity in the
//! `X-User-Id` header. The extractor here turns that into a typed [`UserId`]
//! and rejects requests without one.

use axum::{extract::FromRequestParts, http::request::Parts};

use laced_core::UserId;

use crate::error::AppError;

/// Header carrying the authenticated user's opaque identifier.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated user for this request.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub UserId);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("missing X-User-Id header".to_string()))?;

        let id = raw
            .parse::<i64>()
            .map_err(|_| AppError::Unauthorized("invalid X-User-Id header".to_string()))?;

        Ok(Self(UserId::new(id)))
    }
}
