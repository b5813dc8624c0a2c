use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub struct DbUser {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
}

/// Insert payload for `users`; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub age: Option<i64>,
    pub gender: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DbActivity {
    pub id: i64,
    pub user_id: i64,
    pub category: String,
    pub duration_minutes: i64,
    pub notes: Option<String>,
    pub mood_rating: Option<i64>,
    pub photo_url: Option<String>,
    pub activity_date: NaiveDate,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewActivity {
    pub category: String,
    pub duration_minutes: i64,
    pub notes: Option<String>,
    pub mood_rating: Option<i64>,
    pub photo_url: Option<String>,
    pub activity_date: NaiveDate,
}
