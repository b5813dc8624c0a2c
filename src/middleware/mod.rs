pub mod auth;
pub mod validated_json;

pub use auth::AuthUser;
pub use validated_json::ValidatedJson;
