//! Caller identity extractor.
//!
//! The identity provider itself is external; by the time a request
//! reaches this API the caller carries a stable user identifier in the
//! `X-User-Id` header. Extracting `Identity` validates its presence --
//! a missing or empty header is a 401.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::http::error::AppError;
use crate::state::AppState;

/// Authenticated caller identity. Extracting this validates the header.
pub struct Identity {
    pub user_id: String,
}

impl FromRequestParts<AppState> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                AppError::Unauthorized(
                    "Missing caller identity. Provide the 'X-User-Id' header.".to_string(),
                )
            })?;

        Ok(Identity {
            user_id: user_id.to_string(),
        })
    }
}
