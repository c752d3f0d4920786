use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        EvaluationRepository, MongoEvaluationRepository, MongoUserRepository, UserRepository,
    },
    services::{EvaluationService, IdentityService},
};

#[derive(Clone)]
pub struct AppState {
    pub identity_service: Arc<IdentityService>,
    pub evaluation_service: Arc<EvaluationService>,
    pub jwt_service: Arc<JwtService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let user_repository = Arc::new(MongoUserRepository::new(&db));
        user_repository.ensure_indexes().await?;
        let evaluation_repository = Arc::new(MongoEvaluationRepository::new(&db));

        Ok(Self::with_repositories(
            config,
            user_repository,
            evaluation_repository,
        ))
    }

    /// Wires the service graph over any repository implementations.
    /// Tests use this with in-memory repositories.
    pub fn with_repositories(
        config: Config,
        user_repository: Arc<dyn UserRepository>,
        evaluation_repository: Arc<dyn EvaluationRepository>,
    ) -> Self {
        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
        ));
        let identity_service = Arc::new(IdentityService::new(
            user_repository,
            Arc::clone(&jwt_service),
        ));
        let evaluation_service = Arc::new(EvaluationService::new(evaluation_repository));

        Self {
            identity_service,
            evaluation_service,
            jwt_service,
            config: Arc::new(config),
        }
    }
}
