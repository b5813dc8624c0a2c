use axum::RequestPartsExt;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};

use crate::error::TrackerError;
use crate::router::TrackerState;

/// Caller identity taken from `Authorization: Bearer <token>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub i64);

impl FromRequestParts<TrackerState> for AuthUser {
    type Rejection = TrackerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &TrackerState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|rejection| {
                if rejection.is_missing() {
                    TrackerError::MissingToken
                } else {
                    TrackerError::InvalidToken
                }
            })?;
        let user_id = state.tokens.verify(bearer.token())?;
        Ok(Self(user_id))
    }
}
