use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;
use validator::ValidateEmail;

use crate::{
    errors::FieldViolation,
    models::domain::evaluation::{EvaluationStatus, SCORE_MAX, SCORE_MIN},
    models::domain::UserRole,
};

const MIN_PASSWORD_LENGTH: usize = 6;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
}

impl RegisterRequest {
    pub fn validate(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();

        if !self.email.validate_email() {
            violations.push(FieldViolation::new("email", "A valid email is required"));
        }
        if self.password.len() < MIN_PASSWORD_LENGTH {
            violations.push(FieldViolation::new(
                "password",
                "Password must be at least 6 characters",
            ));
        }
        if self.name.trim().is_empty() {
            violations.push(FieldViolation::new("name", "Name is required"));
        }
        if let Some(role) = &self.role {
            if UserRole::parse(role).is_none() {
                violations.push(FieldViolation::new(
                    "role",
                    "Role must be either 'user' or 'admin'",
                ));
            }
        }

        violations
    }

    pub fn parsed_role(&self) -> UserRole {
        self.role
            .as_deref()
            .and_then(UserRole::parse)
            .unwrap_or(UserRole::User)
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();

        if !self.email.validate_email() {
            violations.push(FieldViolation::new("email", "A valid email is required"));
        }
        if self.password.is_empty() {
            violations.push(FieldViolation::new("password", "Password is required"));
        }

        violations
    }
}

/// Status arrives as a free-form string so an out-of-enum value surfaces
/// as a field violation rather than a deserialization failure.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateEvaluationRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
}

impl CreateEvaluationRequest {
    pub fn validate(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();

        if self.title.trim().is_empty() {
            violations.push(FieldViolation::new("title", "Title is required"));
        }
        if let Some(score) = self.score {
            if !(SCORE_MIN..=SCORE_MAX).contains(&score) {
                violations.push(FieldViolation::new(
                    "score",
                    "Score must be between 0 and 100",
                ));
            }
        }
        if let Some(status) = &self.status {
            if EvaluationStatus::parse(status).is_none() {
                violations.push(FieldViolation::new(
                    "status",
                    "Status must be one of 'pending', 'in_progress', 'completed'",
                ));
            }
        }

        violations
    }

    pub fn parsed_status(&self) -> EvaluationStatus {
        self.status
            .as_deref()
            .and_then(EvaluationStatus::parse)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateEvaluationRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
}

impl UpdateEvaluationRequest {
    pub fn validate(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();

        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                violations.push(FieldViolation::new("title", "Title is required"));
            }
        }
        if let Some(score) = self.score {
            if !(SCORE_MIN..=SCORE_MAX).contains(&score) {
                violations.push(FieldViolation::new(
                    "score",
                    "Score must be between 0 and 100",
                ));
            }
        }
        if let Some(status) = &self.status {
            if EvaluationStatus::parse(status).is_none() {
                violations.push(FieldViolation::new(
                    "status",
                    "Status must be one of 'pending', 'in_progress', 'completed'",
                ));
            }
        }

        violations
    }

    pub fn parsed_status(&self) -> Option<EvaluationStatus> {
        self.status.as_deref().and_then(EvaluationStatus::parse)
    }
}

/// Query-string pagination window. Absent or non-numeric values fall back
/// to page 1 / limit 10 instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub limit: Option<i64>,
}

impl PaginationParams {
    pub fn page(&self) -> i64 {
        self.page.filter(|p| *p >= 1).unwrap_or(DEFAULT_PAGE)
    }

    pub fn limit(&self) -> i64 {
        self.limit.filter(|l| *l >= 1).unwrap_or(DEFAULT_LIMIT)
    }

    pub fn skip(&self) -> u64 {
        ((self.page() - 1) * self.limit()) as u64
    }
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|s| s.parse().ok()))
}
