use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl EvaluationStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(EvaluationStatus::Pending),
            "in_progress" => Some(EvaluationStatus::InProgress),
            "completed" => Some(EvaluationStatus::Completed),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Evaluation {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub status: EvaluationStatus,
    pub created_by: ObjectId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Evaluation {
    pub fn new(
        title: String,
        description: Option<String>,
        score: Option<f64>,
        status: EvaluationStatus,
        created_by: ObjectId,
    ) -> Self {
        let now = Utc::now();
        Evaluation {
            id: ObjectId::new(),
            title,
            description,
            score,
            status,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Set of validated field updates applied to an existing evaluation.
/// Only fields present in the patch are written.
#[derive(Clone, Debug, Default)]
pub struct EvaluationPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub score: Option<f64>,
    pub status: Option<EvaluationStatus>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl EvaluationPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.score.is_none()
            && self.status.is_none()
    }

    /// Applies the patch in place, bumping `updated_at`.
    pub fn apply_to(&self, evaluation: &mut Evaluation) {
        if let Some(title) = &self.title {
            evaluation.title = title.clone();
        }
        if let Some(description) = &self.description {
            evaluation.description = Some(description.clone());
        }
        if let Some(score) = self.score {
            evaluation.score = Some(score);
        }
        if let Some(status) = self.status {
            evaluation.status = status;
        }
        evaluation.updated_at = self.updated_at.unwrap_or_else(Utc::now);
    }
}
