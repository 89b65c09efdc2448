//! Administrator access check

use super::state::AppState;
use crate::error::ApiError;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use subtle::ConstantTimeEq;

/// Proof that the request carries the configured administrator token.
///
/// Add it as a handler argument to make the route privileged.
#[derive(Debug, Clone, Copy)]
pub struct Admin;

#[async_trait]
impl FromRequestParts<AppState> for Admin {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.admin_token.as_deref() else {
            return Err(ApiError::Forbidden(
                "Administrator access is disabled on this server".to_string(),
            ));
        };

        let supplied = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim);

        match supplied {
            Some(token) if bool::from(token.as_bytes().ct_eq(expected.as_bytes())) => Ok(Admin),
            _ => {
                tracing::debug!(path = %parts.uri.path(), "Rejected non-administrator request");
                Err(ApiError::Forbidden(
                    "Administrator privileges required".to_string(),
                ))
            }
        }
    }
}
