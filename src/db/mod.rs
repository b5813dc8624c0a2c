//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and insert payloads
//! - `schema.rs`: SQL DDL per backend (SQLite for local use, Postgres when deployed)
//! - `store.rs`: `TrackerStorage`, queries over an `sqlx::AnyPool`

pub mod models;
pub mod schema;
pub mod store;

pub use models::{DbActivity, DbUser, NewActivity, NewUser};
pub use schema::{POSTGRES_INIT, SQLITE_INIT};
pub use store::{Backend, TrackerStorage};
