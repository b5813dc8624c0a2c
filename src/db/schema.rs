//! SQL DDL for the tracker tables.
//!
//! Both backends share the same column shape: timestamps are RFC3339 text,
//! dates are `YYYY-MM-DD` text and booleans are integers 0/1, so rows decode
//! identically through `sqlx::Any`.

pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    name TEXT NOT NULL,
    age INTEGER NULL,
    gender TEXT NULL,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NULL, -- RFC3339
    last_login TEXT NULL -- RFC3339
);

CREATE TABLE IF NOT EXISTS activities (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    category TEXT NOT NULL,
    duration_minutes INTEGER NOT NULL,
    notes TEXT NULL,
    mood_rating INTEGER NULL,
    photo_url TEXT NULL,
    activity_date TEXT NOT NULL, -- YYYY-MM-DD
    created_at TEXT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_activities_user_id ON activities(user_id);
CREATE INDEX IF NOT EXISTS idx_activities_user_date ON activities(user_id, activity_date);
"#;

/// Postgres uses BIGINT everywhere so every integer column decodes as i64.
pub const POSTGRES_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    email VARCHAR(255) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    name VARCHAR(100) NOT NULL,
    age BIGINT NULL,
    gender VARCHAR(50) NULL,
    is_active BIGINT NOT NULL DEFAULT 1,
    created_at TEXT NULL,
    last_login TEXT NULL
);

CREATE TABLE IF NOT EXISTS activities (
    id BIGSERIAL PRIMARY KEY,
    user_id BIGINT NOT NULL,
    category VARCHAR(100) NOT NULL,
    duration_minutes BIGINT NOT NULL,
    notes TEXT NULL,
    mood_rating BIGINT NULL,
    photo_url VARCHAR(500) NULL,
    activity_date TEXT NOT NULL,
    created_at TEXT NULL
);

CREATE INDEX IF NOT EXISTS idx_activities_user_id ON activities(user_id);
CREATE INDEX IF NOT EXISTS idx_activities_user_date ON activities(user_id, activity_date);
"#;
