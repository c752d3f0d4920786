use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::domain::{Evaluation, EvaluationStatus, User, UserRole};

/// Public view of a user. The password hash never crosses this boundary.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            id: user.id.to_hex(),
            email: user.email,
            name: user.name,
            role: user.role,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationDto {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub status: EvaluationStatus,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Evaluation> for EvaluationDto {
    fn from(evaluation: Evaluation) -> Self {
        EvaluationDto {
            id: evaluation.id.to_hex(),
            title: evaluation.title,
            description: evaluation.description,
            score: evaluation.score,
            status: evaluation.status,
            created_by: evaluation.created_by.to_hex(),
            created_at: evaluation.created_at,
            updated_at: evaluation.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: UserDto,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    pub user: UserDto,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EvaluationResponse {
    pub message: String,
    pub evaluation: EvaluationDto,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EvaluationDetailResponse {
    pub evaluation: EvaluationDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub current_page: i64,
    pub total_pages: u64,
    pub total_items: u64,
    pub items_per_page: i64,
}

impl PaginationMeta {
    pub fn new(page: i64, limit: i64, total: u64) -> Self {
        let total_pages = total.div_ceil(limit as u64);
        PaginationMeta {
            current_page: page,
            total_pages,
            total_items: total,
            items_per_page: limit,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EvaluationListResponse {
    pub evaluations: Vec<EvaluationDto>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
