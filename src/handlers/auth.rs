use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use tracing::info;

use crate::db::NewUser;
use crate::error::TrackerError;
use crate::middleware::ValidatedJson;
use crate::router::TrackerState;
use crate::types::user::{AuthResponse, LoginRequest, RegisterRequest, UserProfile};

/// POST /auth/register (also mounted at /signup)
pub async fn register(
    State(state): State<TrackerState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), TrackerError> {
    if state.storage.find_user_by_email(&req.email).await?.is_some() {
        return Err(TrackerError::EmailAlreadyRegistered);
    }

    let user = state
        .storage
        .create_user(NewUser {
            password_hash: state.passwords.hash(&req.password),
            email: req.email,
            name: req.name,
            age: req.age,
            gender: req.gender,
        })
        .await?;
    let token = state.tokens.issue(user.id)?;

    info!(user_id = user.id, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully".to_string(),
            token,
            token_type: "bearer".to_string(),
            user: UserProfile::from(user),
        }),
    ))
}

/// POST /auth/login
pub async fn login(
    State(state): State<TrackerState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, TrackerError> {
    let Some(mut user) = state.storage.find_user_by_email(&req.email).await? else {
        return Err(TrackerError::InvalidCredentials);
    };
    if !state.passwords.verify(&req.password, &user.password_hash) {
        info!(user_id = user.id, "login rejected: wrong password");
        return Err(TrackerError::InvalidCredentials);
    }
    if !user.is_active {
        return Err(TrackerError::AccountDisabled);
    }

    let now = Utc::now();
    state.storage.touch_last_login(user.id, now).await?;
    user.last_login = Some(now);
    let token = state.tokens.issue(user.id)?;

    info!(user_id = user.id, "user logged in");
    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        token_type: "bearer".to_string(),
        user: UserProfile::from(user),
    }))
}
