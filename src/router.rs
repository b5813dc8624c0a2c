use crate::config::Config;
use crate::db::TrackerStorage;
use crate::handlers::{activities, auth, meta};
use crate::service::{PasswordHasher, TokenIssuer};
use axum::{
    Router,
    routing::{get, post},
};
use chrono::Duration;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct TrackerState {
    pub storage: TrackerStorage,
    pub tokens: TokenIssuer,
    pub passwords: PasswordHasher,
    pub static_dir: Arc<PathBuf>,
}

impl TrackerState {
    pub fn new(storage: TrackerStorage, cfg: &Config) -> Self {
        Self {
            storage,
            tokens: TokenIssuer::new(
                &cfg.secret_key,
                Duration::try_days(cfg.token_ttl_days).unwrap_or(Duration::MAX),
            ),
            passwords: PasswordHasher::new(cfg.password_salt.clone()),
            static_dir: Arc::new(cfg.static_dir.clone()),
        }
    }
}

pub fn tracker_router(state: TrackerState) -> Router {
    let static_dir = state.static_dir.as_ref().clone();
    let index = ServeFile::new(static_dir.join("index.html"));

    Router::new()
        .route_service("/", index)
        .nest_service("/static", ServeDir::new(static_dir))
        .route("/api", get(meta::api_root))
        .route("/health", get(meta::health_check))
        .route("/categories", get(meta::list_categories))
        .route("/auth/register", post(auth::register))
        .route("/signup", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route(
            "/activities",
            post(activities::create_activity).get(activities::list_activities),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
