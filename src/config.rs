use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://daily_tracker.db?mode=rwc";
pub const DEFAULT_SECRET_KEY: &str = "your-secret-key-change-this-in-production";
pub const DEFAULT_PASSWORD_SALT: &str = "daily_tracker_salt";
/// Upper bound accepted for `TOKEN_TTL_DAYS`.
pub const MAX_TOKEN_TTL_DAYS: i64 = 3650;

/// Environment keys read by [`Config::load`]. Matching is case-insensitive.
const ENV_KEYS: &[&str] = &[
    "database_url",
    "secret_key",
    "password_salt",
    "port",
    "host",
    "static_dir",
    "loglevel",
    "token_ttl_days",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub secret_key: String,
    pub password_salt: String,
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub loglevel: String,
    pub token_ttl_days: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            password_salt: DEFAULT_PASSWORD_SALT.to_string(),
            host: "0.0.0.0".to_string(),
            port: 8000,
            static_dir: PathBuf::from("static"),
            loglevel: "info".to_string(),
            token_ttl_days: 30,
        }
    }
}

impl Config {
    /// Defaults overlaid with process environment variables.
    /// Call `dotenvy::dotenv()` first if a `.env` file should take part.
    pub fn load() -> Result<Self, figment::Error> {
        let cfg: Self = Self::figment().extract()?;
        cfg.check_ranges()?;
        Ok(cfg)
    }

    fn check_ranges(&self) -> Result<(), figment::Error> {
        if !(1..=MAX_TOKEN_TTL_DAYS).contains(&self.token_ttl_days) {
            return Err(figment::Error::from(format!(
                "token_ttl_days must be between 1 and {MAX_TOKEN_TTL_DAYS}, got {}",
                self.token_ttl_days
            )));
        }
        Ok(())
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::raw().only(ENV_KEYS))
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }

    pub fn uses_default_salt(&self) -> bool {
        self.password_salt == DEFAULT_PASSWORD_SALT
    }

    /// Database URL with any password replaced, safe for logs.
    pub fn redacted_database_url(&self) -> String {
        match url::Url::parse(&self.database_url) {
            Ok(mut parsed) if parsed.password().is_some() => {
                let _ = parsed.set_password(Some("***"));
                parsed.to_string()
            }
            _ => self.database_url.clone(),
        }
    }
}
