use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::IntoResponse,
};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum TrackerError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] Box<figment::Error>),

    #[error("Manifest YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("Invalid listen address: {0}")]
    ListenAddr(#[from] std::net::AddrParseError),

    #[error("Token lifetime is out of range")]
    TokenLifetime,

    #[error("Unsupported database url: {0}")]
    UnsupportedDatabase(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account is deactivated")]
    AccountDisabled,

    #[error("Token is missing")]
    MissingToken,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

impl From<figment::Error> for TrackerError {
    fn from(e: figment::Error) -> Self {
        TrackerError::ConfigError(Box::new(e))
    }
}

impl IntoResponse for TrackerError {
    fn into_response(self) -> axum::response::Response {
        let message = self.to_string();
        let (status, code, challenge) = match self {
            TrackerError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR", false),
            TrackerError::EmailAlreadyRegistered => (StatusCode::BAD_REQUEST, "EMAIL_TAKEN", false),
            TrackerError::BadRequest(_)
            | TrackerError::UnknownCategory(_)
            | TrackerError::InvalidDate(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", false),
            TrackerError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS", false)
            }
            TrackerError::MissingToken | TrackerError::TokenExpired | TrackerError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", true)
            }
            TrackerError::AccountDisabled => (StatusCode::FORBIDDEN, "FORBIDDEN", false),
            TrackerError::DatabaseError(_)
            | TrackerError::JwtError(_)
            | TrackerError::IoError(_)
            | TrackerError::ConfigError(_)
            | TrackerError::YamlError(_)
            | TrackerError::InvalidManifest(_)
            | TrackerError::ListenAddr(_)
            | TrackerError::TokenLifetime
            | TrackerError::UnsupportedDatabase(_) => {
                error!(error = %message, "request failed with internal error");
                let body = ApiErrorBody {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                };
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiErrorResponse { error: body }),
                )
                    .into_response();
            }
        };

        let body = ApiErrorBody {
            code: code.to_string(),
            message,
        };
        let mut resp = (status, Json(ApiErrorResponse { error: body })).into_response();
        if challenge {
            resp.headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        resp
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
