use crate::db::{DbActivity, NewActivity};
use crate::error::TrackerError;
use crate::service::categories;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateActivityRequest {
    #[validate(custom(function = "validate_category_present"))]
    pub category: String,

    #[validate(range(
        min = 1,
        max = 1440,
        message = "Duration must be between 1-1440 minutes (24 hours)"
    ))]
    pub duration_minutes: i64,

    #[validate(length(max = 1000, message = "Notes must be at most 1000 characters"))]
    pub notes: Option<String>,

    #[validate(range(min = 1, max = 5, message = "Mood rating must be between 1-5"))]
    pub mood_rating: Option<i64>,

    #[validate(length(max = 500, message = "Photo URL must be at most 500 characters"))]
    pub photo_url: Option<String>,

    pub activity_date: Option<NaiveDate>,
}

impl CreateActivityRequest {
    pub fn normalized(mut self) -> Self {
        self.category = self.category.trim().to_string();
        self
    }

    /// Resolve the category against the fixed list and default the date to today (UTC).
    pub fn into_new_activity(self) -> Result<NewActivity, TrackerError> {
        if !categories::is_known(&self.category) {
            return Err(TrackerError::UnknownCategory(self.category));
        }
        Ok(NewActivity {
            category: self.category,
            duration_minutes: self.duration_minutes,
            notes: self.notes,
            mood_rating: self.mood_rating,
            photo_url: self.photo_url,
            activity_date: self
                .activity_date
                .unwrap_or_else(|| Utc::now().date_naive()),
        })
    }
}

fn validate_category_present(category: &str) -> Result<(), ValidationError> {
    if category.trim().is_empty() {
        return Err(ValidationError::new("category_required")
            .with_message(Cow::Borrowed("Category is required")));
    }
    Ok(())
}

#[derive(Debug, Default, Deserialize)]
pub struct ActivityQuery {
    pub activity_date: Option<String>,
}

impl ActivityQuery {
    pub fn date(&self) -> Result<Option<NaiveDate>, TrackerError> {
        match self.activity_date.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| TrackerError::InvalidDate(raw.to_string())),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActivityCreated {
    pub message: String,
    pub activity: DbActivity,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActivityList {
    pub activities: Vec<DbActivity>,
    pub count: usize,
    pub total_minutes: i64,
}

impl From<Vec<DbActivity>> for ActivityList {
    fn from(activities: Vec<DbActivity>) -> Self {
        let total_minutes = activities.iter().map(|a| a.duration_minutes).sum();
        Self {
            count: activities.len(),
            total_minutes,
            activities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(duration: i64, mood: Option<i64>) -> CreateActivityRequest {
        CreateActivityRequest {
            category: "  Sleep ".to_string(),
            duration_minutes: duration,
            notes: None,
            mood_rating: mood,
            photo_url: None,
            activity_date: None,
        }
        .normalized()
    }

    #[test]
    fn duration_bounds() {
        assert!(request(0, None).validate().is_err());
        assert!(request(1, None).validate().is_ok());
        assert!(request(1440, None).validate().is_ok());
        assert!(request(1441, None).validate().is_err());
    }

    #[test]
    fn mood_bounds() {
        assert!(request(30, Some(0)).validate().is_err());
        assert!(request(30, Some(5)).validate().is_ok());
        assert!(request(30, Some(6)).validate().is_err());
    }

    #[test]
    fn category_must_be_known() {
        let new = request(30, None).into_new_activity().unwrap();
        assert_eq!(new.category, "Sleep");
        assert_eq!(new.activity_date, Utc::now().date_naive());

        let mut unknown = request(30, None);
        unknown.category = "Gaming".to_string();
        assert!(matches!(
            unknown.into_new_activity(),
            Err(TrackerError::UnknownCategory(c)) if c == "Gaming"
        ));
    }

    #[test]
    fn blank_category_fails_validation() {
        let mut req = request(30, None);
        req.category = "   ".to_string();
        assert!(req.normalized().validate().is_err());
    }

    #[test]
    fn query_date_parsing() {
        let none = ActivityQuery::default();
        assert_eq!(none.date().unwrap(), None);

        let day = ActivityQuery {
            activity_date: Some("2024-03-09".to_string()),
        };
        assert_eq!(day.date().unwrap(), NaiveDate::from_ymd_opt(2024, 3, 9));

        let bad = ActivityQuery {
            activity_date: Some("09/03/2024".to_string()),
        };
        assert!(matches!(bad.date(), Err(TrackerError::InvalidDate(_))));
    }
}
