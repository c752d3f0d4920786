use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use evaluation_server::{
    app_state::AppState,
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{Evaluation, EvaluationPatch, User},
    repositories::{EvaluationRepository, UserRepository},
};

/// In-memory stand-in for the Mongo user collection, including the
/// unique-email behaviour the real collection gets from its index.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<ObjectId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryEvaluationRepository {
    evaluations: RwLock<HashMap<ObjectId, Evaluation>>,
}

impl InMemoryEvaluationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EvaluationRepository for InMemoryEvaluationRepository {
    async fn insert(&self, evaluation: Evaluation) -> AppResult<Evaluation> {
        let mut evaluations = self.evaluations.write().await;
        evaluations.insert(evaluation.id, evaluation.clone());
        Ok(evaluation)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Evaluation>> {
        let evaluations = self.evaluations.read().await;
        Ok(evaluations.get(id).cloned())
    }

    async fn find_by_owner_paged(
        &self,
        owner: Option<&ObjectId>,
        skip: u64,
        limit: i64,
    ) -> AppResult<(Vec<Evaluation>, u64)> {
        let evaluations = self.evaluations.read().await;
        let mut items: Vec<Evaluation> = evaluations
            .values()
            .filter(|e| owner.map_or(true, |o| e.created_by == *o))
            .cloned()
            .collect();

        // Newest first, id as tiebreaker for same-instant records
        items.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let total = items.len() as u64;
        let start = (skip as usize).min(items.len());
        let end = (start + limit.max(0) as usize).min(items.len());

        Ok((items[start..end].to_vec(), total))
    }

    async fn update_fields(
        &self,
        id: &ObjectId,
        patch: &EvaluationPatch,
    ) -> AppResult<Option<Evaluation>> {
        let mut evaluations = self.evaluations.write().await;
        let Some(evaluation) = evaluations.get_mut(id) else {
            return Ok(None);
        };
        patch.apply_to(evaluation);
        Ok(Some(evaluation.clone()))
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<bool> {
        let mut evaluations = self.evaluations.write().await;
        Ok(evaluations.remove(id).is_some())
    }
}

/// Application state over in-memory repositories, for tests that need
/// the full service graph without a database.
pub fn test_state() -> AppState {
    AppState::with_repositories(
        Config::test_config(),
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryEvaluationRepository::new()),
    )
}
