use crate::db::models::{DbActivity, DbUser, NewActivity, NewUser};
use crate::db::schema::{POSTGRES_INIT, SQLITE_INIT};
use crate::error::TrackerError;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::any::{AnyPoolOptions, AnyRow};
use sqlx::{AnyPool, Row};
use std::time::Duration;
use tracing::{debug, info};

const DATE_FORMAT: &str = "%Y-%m-%d";

const USER_COLUMNS: &str =
    "id, email, password_hash, name, age, gender, is_active, created_at, last_login";
const ACTIVITY_COLUMNS: &str = "id, user_id, category, duration_minutes, notes, mood_rating, \
     photo_url, activity_date, created_at";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Sqlite,
    Postgres,
}

impl Backend {
    pub fn from_url(database_url: &str) -> Result<Self, TrackerError> {
        let scheme = database_url
            .split_once(':')
            .map(|(scheme, _)| scheme.to_ascii_lowercase())
            .unwrap_or_default();
        match scheme.as_str() {
            "sqlite" => Ok(Backend::Sqlite),
            "postgres" | "postgresql" => Ok(Backend::Postgres),
            _ => Err(TrackerError::UnsupportedDatabase(scheme)),
        }
    }

    fn init_script(self) -> &'static str {
        match self {
            Backend::Sqlite => SQLITE_INIT,
            Backend::Postgres => POSTGRES_INIT,
        }
    }

    fn max_connections(self) -> u32 {
        match self {
            Backend::Sqlite => 4,
            Backend::Postgres => 10,
        }
    }
}

#[derive(Clone)]
pub struct TrackerStorage {
    pool: AnyPool,
    backend: Backend,
}

impl TrackerStorage {
    pub fn new(pool: AnyPool, backend: Backend) -> Self {
        Self { pool, backend }
    }

    /// Open a pool for `database_url` (sqlite or postgres) and create missing tables.
    pub async fn connect(database_url: &str) -> Result<Self, TrackerError> {
        let backend = Backend::from_url(database_url)?;
        sqlx::any::install_default_drivers();
        let pool = AnyPoolOptions::new()
            .max_connections(backend.max_connections())
            .acquire_timeout(Duration::from_secs(10))
            .connect(database_url)
            .await?;
        let storage = Self::new(pool, backend);
        storage.init_schema().await?;
        info!(backend = ?backend, "database ready");
        Ok(storage)
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), TrackerError> {
        // one statement per query; the Any driver does not accept multi-statement strings
        for stmt in self.backend.init_script().split(';') {
            let s = strip_sql_comments(stmt);
            if s.is_empty() {
                continue;
            }
            sqlx::query(&s).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), TrackerError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn create_user(&self, user: NewUser) -> Result<DbUser, TrackerError> {
        let created_at = Utc::now();
        let sql = format!(
            "INSERT INTO users (email, password_hash, name, age, gender, is_active, created_at) \
             VALUES ($1, $2, $3, $4, $5, 1, $6) RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(user.email)
            .bind(user.password_hash)
            .bind(user.name)
            .bind(user.age)
            .bind(user.gender)
            .bind(created_at.to_rfc3339())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    TrackerError::EmailAlreadyRegistered
                }
                other => TrackerError::DatabaseError(other),
            })?;
        Self::row_to_user(row)
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<DbUser>, TrackerError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Self::row_to_user).transpose()
    }

    pub async fn get_user(&self, id: i64) -> Result<Option<DbUser>, TrackerError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Self::row_to_user).transpose()
    }

    pub async fn touch_last_login(&self, id: i64, at: DateTime<Utc>) -> Result<(), TrackerError> {
        sqlx::query("UPDATE users SET last_login = $1 WHERE id = $2")
            .bind(at.to_rfc3339())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn set_active(&self, id: i64, active: bool) -> Result<(), TrackerError> {
        let active_i: i64 = if active { 1 } else { 0 };
        sqlx::query("UPDATE users SET is_active = $1 WHERE id = $2")
            .bind(active_i)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn insert_activity(
        &self,
        user_id: i64,
        activity: NewActivity,
    ) -> Result<DbActivity, TrackerError> {
        let sql = format!(
            "INSERT INTO activities (user_id, category, duration_minutes, notes, mood_rating, \
             photo_url, activity_date, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {ACTIVITY_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(user_id)
            .bind(activity.category)
            .bind(activity.duration_minutes)
            .bind(activity.notes)
            .bind(activity.mood_rating)
            .bind(activity.photo_url)
            .bind(activity.activity_date.format(DATE_FORMAT).to_string())
            .bind(Utc::now().to_rfc3339())
            .fetch_one(&self.pool)
            .await?;
        let inserted = Self::row_to_activity(row)?;
        debug!(id = inserted.id, user_id, "activity stored");
        Ok(inserted)
    }

    /// Activities of one user, newest day first. `on` narrows to a single day.
    pub async fn list_activities(
        &self,
        user_id: i64,
        on: Option<NaiveDate>,
    ) -> Result<Vec<DbActivity>, TrackerError> {
        let rows = match on {
            Some(day) => {
                let sql = format!(
                    "SELECT {ACTIVITY_COLUMNS} FROM activities \
                     WHERE user_id = $1 AND activity_date = $2 \
                     ORDER BY activity_date DESC, id DESC"
                );
                sqlx::query(&sql)
                    .bind(user_id)
                    .bind(day.format(DATE_FORMAT).to_string())
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!(
                    "SELECT {ACTIVITY_COLUMNS} FROM activities \
                     WHERE user_id = $1 ORDER BY activity_date DESC, id DESC"
                );
                sqlx::query(&sql)
                    .bind(user_id)
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        rows.into_iter().map(Self::row_to_activity).collect()
    }

    fn row_to_user(row: AnyRow) -> Result<DbUser, TrackerError> {
        let id: i64 = row.try_get("id")?;
        let email: String = row.try_get("email")?;
        let password_hash: String = row.try_get("password_hash")?;
        let name: String = row.try_get("name")?;
        let age: Option<i64> = row.try_get("age")?;
        let gender: Option<String> = row.try_get("gender")?;
        let is_active_i: i64 = row.try_get("is_active")?;
        let created_at: Option<String> = row.try_get("created_at")?;
        let last_login: Option<String> = row.try_get("last_login")?;

        Ok(DbUser {
            id,
            email,
            password_hash,
            name,
            age,
            gender,
            is_active: is_active_i != 0,
            created_at: parse_timestamp(created_at)?,
            last_login: parse_timestamp(last_login)?,
        })
    }

    fn row_to_activity(row: AnyRow) -> Result<DbActivity, TrackerError> {
        let id: i64 = row.try_get("id")?;
        let user_id: i64 = row.try_get("user_id")?;
        let category: String = row.try_get("category")?;
        let duration_minutes: i64 = row.try_get("duration_minutes")?;
        let notes: Option<String> = row.try_get("notes")?;
        let mood_rating: Option<i64> = row.try_get("mood_rating")?;
        let photo_url: Option<String> = row.try_get("photo_url")?;
        let date_str: String = row.try_get("activity_date")?;
        let created_at: Option<String> = row.try_get("created_at")?;

        let activity_date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        Ok(DbActivity {
            id,
            user_id,
            category,
            duration_minutes,
            notes,
            mood_rating,
            photo_url,
            activity_date,
            created_at: parse_timestamp(created_at)?,
        })
    }
}

fn parse_timestamp(raw: Option<String>) -> Result<Option<DateTime<Utc>>, TrackerError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let parsed = DateTime::parse_from_rfc3339(&raw)
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?
        .with_timezone(&Utc);
    Ok(Some(parsed))
}

fn strip_sql_comments(stmt: &str) -> String {
    stmt.lines()
        .map(|line| match line.find("--") {
            Some(idx) => &line[..idx],
            None => line,
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_is_chosen_by_scheme() {
        assert_eq!(Backend::from_url("sqlite://x.db?mode=rwc").unwrap(), Backend::Sqlite);
        assert_eq!(Backend::from_url("sqlite::memory:").unwrap(), Backend::Sqlite);
        assert_eq!(
            Backend::from_url("postgres://u:p@h/daily_tracker").unwrap(),
            Backend::Postgres
        );
        assert_eq!(
            Backend::from_url("postgresql://u:p@h/daily_tracker").unwrap(),
            Backend::Postgres
        );
        assert!(matches!(
            Backend::from_url("mysql+pymysql://root@localhost/daily_tracker"),
            Err(TrackerError::UnsupportedDatabase(_))
        ));
    }

    #[test]
    fn comments_are_removed_from_ddl() {
        let stmts: Vec<String> = SQLITE_INIT
            .split(';')
            .map(strip_sql_comments)
            .filter(|s| !s.is_empty())
            .collect();
        assert_eq!(stmts.len(), 4);
        assert!(stmts.iter().all(|s| !s.contains("--")));
    }
}
