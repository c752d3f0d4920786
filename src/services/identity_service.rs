use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use crate::{
    auth::JwtService,
    errors::{AppError, AppResult},
    models::{
        domain::User,
        dto::{
            request::{LoginRequest, RegisterRequest},
            response::AuthResponse,
        },
    },
    repositories::UserRepository,
};

pub struct IdentityService {
    repository: Arc<dyn UserRepository>,
    jwt_service: Arc<JwtService>,
}

impl IdentityService {
    pub fn new(repository: Arc<dyn UserRepository>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            repository,
            jwt_service,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        let violations = request.validate();
        if !violations.is_empty() {
            return Err(AppError::Validation(violations));
        }

        // Early duplicate check for a clean error; the unique index on
        // email is what actually decides concurrent registrations.
        if self.repository.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;

        let user = User::new(
            &request.email,
            &password_hash,
            request.name.trim(),
            request.parsed_role(),
        );
        let user = self.repository.create(user).await?;

        log::info!("Registered new user {}", user.email);

        let token = self.jwt_service.create_token(&user)?;
        Ok(AuthResponse {
            message: "User registered successfully".to_string(),
            token,
            user: user.into(),
        })
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let violations = request.validate();
        if !violations.is_empty() {
            return Err(AppError::Validation(violations));
        }

        // Unknown email and wrong password must be indistinguishable
        let invalid_credentials =
            || AppError::Unauthenticated("Invalid email or password".to_string());

        let user = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(invalid_credentials)?;

        let password_matches = bcrypt::verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("Failed to verify password: {}", e)))?;
        if !password_matches {
            return Err(invalid_credentials());
        }

        let token = self.jwt_service.create_token(&user)?;
        Ok(AuthResponse {
            message: "Login successful".to_string(),
            token,
            user: user.into(),
        })
    }

    /// Resolves a token subject to a live user. Used by the authentication
    /// guard on every protected request.
    pub async fn resolve(&self, subject: &str) -> AppResult<Option<User>> {
        let Ok(id) = ObjectId::parse_str(subject) else {
            return Ok(None);
        };
        self.repository.find_by_id(&id).await
    }
}
