//! OpenAPI description of the evaluation API, served under `/api-docs`.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::{
    errors::{ErrorResponse, FieldViolation},
    models::{
        domain::{EvaluationStatus, UserRole},
        dto::{
            request::{
                CreateEvaluationRequest, LoginRequest, RegisterRequest, UpdateEvaluationRequest,
            },
            response::{
                AuthResponse, EvaluationDetailResponse, EvaluationDto, EvaluationListResponse,
                EvaluationResponse, MessageResponse, PaginationMeta, ProfileResponse, UserDto,
            },
        },
    },
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Evaluation API",
        version = "0.1.0",
        description = "CRUD REST API for evaluation records with JWT authentication"
    ),
    paths(
        crate::handlers::auth_handler::register,
        crate::handlers::auth_handler::login,
        crate::handlers::auth_handler::profile,
        crate::handlers::evaluation_handler::create_evaluation,
        crate::handlers::evaluation_handler::list_evaluations,
        crate::handlers::evaluation_handler::get_evaluation,
        crate::handlers::evaluation_handler::update_evaluation,
        crate::handlers::evaluation_handler::delete_evaluation,
        crate::handlers::evaluation_handler::health_check,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        CreateEvaluationRequest,
        UpdateEvaluationRequest,
        AuthResponse,
        ProfileResponse,
        UserDto,
        UserRole,
        EvaluationDto,
        EvaluationStatus,
        EvaluationResponse,
        EvaluationDetailResponse,
        EvaluationListResponse,
        PaginationMeta,
        MessageResponse,
        ErrorResponse,
        FieldViolation,
    )),
    tags(
        (name = "Auth", description = "Registration, login and profile"),
        (name = "Evaluations", description = "Evaluation CRUD and listing"),
        (name = "Health", description = "Health check"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
