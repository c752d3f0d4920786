use std::sync::Arc;

use chrono::Utc;
use mongodb::bson::oid::ObjectId;

use crate::{
    auth::require_owner_or_admin,
    errors::{AppError, AppResult},
    models::{
        domain::{Evaluation, EvaluationPatch, User, UserRole},
        dto::{
            request::{CreateEvaluationRequest, PaginationParams, UpdateEvaluationRequest},
            response::{EvaluationListResponse, PaginationMeta},
        },
    },
    repositories::EvaluationRepository,
};

pub struct EvaluationService {
    repository: Arc<dyn EvaluationRepository>,
}

impl EvaluationService {
    pub fn new(repository: Arc<dyn EvaluationRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(
        &self,
        user: &User,
        request: CreateEvaluationRequest,
    ) -> AppResult<Evaluation> {
        let violations = request.validate();
        if !violations.is_empty() {
            return Err(AppError::Validation(violations));
        }

        let evaluation = Evaluation::new(
            request.title.trim().to_string(),
            request.description.clone(),
            request.score,
            request.parsed_status(),
            user.id,
        );

        self.repository.insert(evaluation).await
    }

    /// Admins see every record; everyone else sees only their own.
    pub async fn list(
        &self,
        user: &User,
        params: &PaginationParams,
    ) -> AppResult<EvaluationListResponse> {
        let page = params.page();
        let limit = params.limit();

        let owner = match user.role {
            UserRole::Admin => None,
            UserRole::User => Some(&user.id),
        };

        let (evaluations, total) = self
            .repository
            .find_by_owner_paged(owner, params.skip(), limit)
            .await?;

        Ok(EvaluationListResponse {
            evaluations: evaluations.into_iter().map(Into::into).collect(),
            pagination: PaginationMeta::new(page, limit, total),
        })
    }

    pub async fn get_by_id(&self, user: &User, id: &str) -> AppResult<Evaluation> {
        let evaluation = self.find_existing(id).await?;
        require_owner_or_admin(user, &evaluation.created_by)?;
        Ok(evaluation)
    }

    pub async fn update(
        &self,
        user: &User,
        id: &str,
        request: UpdateEvaluationRequest,
    ) -> AppResult<Evaluation> {
        let evaluation = self.find_existing(id).await?;
        require_owner_or_admin(user, &evaluation.created_by)?;

        let violations = request.validate();
        if !violations.is_empty() {
            return Err(AppError::Validation(violations));
        }

        let patch = EvaluationPatch {
            title: request.title.as_ref().map(|t| t.trim().to_string()),
            description: request.description.clone(),
            score: request.score,
            status: request.parsed_status(),
            updated_at: Some(Utc::now()),
        };

        self.repository
            .update_fields(&evaluation.id, &patch)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn delete(&self, user: &User, id: &str) -> AppResult<()> {
        let evaluation = self.find_existing(id).await?;
        require_owner_or_admin(user, &evaluation.created_by)?;

        if !self.repository.delete(&evaluation.id).await? {
            return Err(not_found());
        }
        Ok(())
    }

    /// Existence is confirmed before any ownership check so that a missing
    /// record is always `NotFound`, never `Forbidden`. A malformed id can't
    /// match anything and reports the same way.
    async fn find_existing(&self, id: &str) -> AppResult<Evaluation> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Err(not_found());
        };
        self.repository
            .find_by_id(&object_id)
            .await?
            .ok_or_else(not_found)
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Evaluation not found".to_string())
}
