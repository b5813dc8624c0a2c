use crate::db::DbUser;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::LazyLock;
use validator::{Validate, ValidationError};

static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("static regex"));
static HAS_LETTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z]").expect("static regex"));
static HAS_DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").expect("static regex"));

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Valid email address required"))]
    pub email: String,

    #[validate(
        length(min = 8, max = 100, message = "Password must be between 8-100 characters"),
        custom(function = "validate_password_strength")
    )]
    pub password: String,

    #[validate(
        length(min = 2, max = 100, message = "Name must be between 2-100 characters"),
        custom(function = "validate_name")
    )]
    pub name: String,

    #[validate(range(min = 13, max = 120, message = "Age must be between 13-120"))]
    pub age: Option<i64>,

    #[validate(length(max = 50, message = "Gender must be at most 50 characters"))]
    pub gender: Option<String>,
}

impl RegisterRequest {
    pub fn normalized(mut self) -> Self {
        self.email = self.email.trim().to_lowercase();
        self.name = self.name.trim().to_string();
        self.gender = self
            .gender
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty());
        self
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Valid email address required"))]
    pub email: String,

    #[validate(custom(function = "validate_not_blank"))]
    pub password: String,
}

impl LoginRequest {
    pub fn normalized(mut self) -> Self {
        self.email = self.email.trim().to_lowercase();
        self
    }
}

fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if !HAS_LETTER.is_match(password) {
        return Err(ValidationError::new("password_letter")
            .with_message(Cow::Borrowed("Password must contain at least one letter")));
    }
    if !HAS_DIGIT.is_match(password) {
        return Err(ValidationError::new("password_digit")
            .with_message(Cow::Borrowed("Password must contain at least one number")));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("name_empty")
            .with_message(Cow::Borrowed("Name cannot be empty")));
    }
    if !NAME_REGEX.is_match(name.trim()) {
        return Err(ValidationError::new("name_format")
            .with_message(Cow::Borrowed("Name can only contain letters and spaces")));
    }
    Ok(())
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required")
            .with_message(Cow::Borrowed("Password is required")));
    }
    Ok(())
}

/// Public view of a user; never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub age: Option<i64>,
    pub gender: Option<String>,
}

impl From<DbUser> for UserProfile {
    fn from(u: DbUser) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            age: u.age,
            gender: u.gender,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub token_type: String,
    pub user: UserProfile,
}
