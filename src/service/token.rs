//! Bearer token issuance and verification (HS256 JWT).

use crate::error::TrackerError;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const ACCESS_TOKEN_TYPE: &str = "access_token";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    #[serde(default)]
    pub user_id: Option<i64>,
    pub exp: i64,
    pub iat: i64,
    #[serde(rename = "type", default)]
    pub token_type: String,
}

#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: Arc<EncodingKey>,
    decoding_key: Arc<DecodingKey>,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding_key: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
            ttl,
        }
    }

    pub fn issue(&self, user_id: i64) -> Result<String, TrackerError> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(self.ttl)
            .filter(|exp| *exp > now)
            .ok_or(TrackerError::TokenLifetime)?;
        let claims = AccessClaims {
            user_id: Some(user_id),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
        };
        self.sign(&claims)
    }

    pub fn sign(&self, claims: &AccessClaims) -> Result<String, TrackerError> {
        Ok(encode(
            &Header::new(Algorithm::HS256),
            claims,
            &self.encoding_key,
        )?)
    }

    /// Returns the user id carried by a valid, unexpired access token.
    pub fn verify(&self, token: &str) -> Result<i64, TrackerError> {
        if token.trim().is_empty() {
            return Err(TrackerError::MissingToken);
        }
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<AccessClaims>(token, &self.decoding_key, &validation).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => TrackerError::TokenExpired,
                _ => TrackerError::InvalidToken,
            },
        )?;
        if data.claims.token_type != ACCESS_TOKEN_TYPE {
            return Err(TrackerError::InvalidToken);
        }
        data.claims.user_id.ok_or(TrackerError::InvalidToken)
    }
}
