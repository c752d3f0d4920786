use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{CreateEvaluationRequest, PaginationParams, UpdateEvaluationRequest},
        response::{EvaluationDetailResponse, EvaluationResponse, MessageResponse},
    },
};

#[utoipa::path(
    post,
    path = "/api/evaluations",
    tag = "Evaluations",
    security(("bearer_auth" = [])),
    request_body = CreateEvaluationRequest,
    responses(
        (status = 201, description = "Evaluation created", body = EvaluationResponse),
        (status = 400, description = "Validation failure", body = crate::errors::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::errors::ErrorResponse),
    )
)]
#[post("")]
pub async fn create_evaluation(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    request: web::Json<CreateEvaluationRequest>,
) -> Result<HttpResponse, AppError> {
    let evaluation = state
        .evaluation_service
        .create(&auth.0, request.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(EvaluationResponse {
        message: "Evaluation created".to_string(),
        evaluation: evaluation.into(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/evaluations",
    tag = "Evaluations",
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<i64>, Query, description = "Page number, defaults to 1"),
        ("limit" = Option<i64>, Query, description = "Items per page, defaults to 10"),
    ),
    responses(
        (status = 200, description = "Paginated evaluations", body = crate::models::dto::response::EvaluationListResponse),
        (status = 401, description = "Not authenticated", body = crate::errors::ErrorResponse),
    )
)]
#[get("")]
pub async fn list_evaluations(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let response = state.evaluation_service.list(&auth.0, &params).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[utoipa::path(
    get,
    path = "/api/evaluations/{id}",
    tag = "Evaluations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Evaluation id")),
    responses(
        (status = 200, description = "Evaluation", body = EvaluationDetailResponse),
        (status = 403, description = "Not the owner", body = crate::errors::ErrorResponse),
        (status = 404, description = "No such evaluation", body = crate::errors::ErrorResponse),
    )
)]
#[get("/{id}")]
pub async fn get_evaluation(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let evaluation = state.evaluation_service.get_by_id(&auth.0, &id).await?;
    Ok(HttpResponse::Ok().json(EvaluationDetailResponse {
        evaluation: evaluation.into(),
    }))
}

#[utoipa::path(
    put,
    path = "/api/evaluations/{id}",
    tag = "Evaluations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Evaluation id")),
    request_body = UpdateEvaluationRequest,
    responses(
        (status = 200, description = "Evaluation updated", body = EvaluationResponse),
        (status = 400, description = "Validation failure", body = crate::errors::ErrorResponse),
        (status = 403, description = "Not the owner", body = crate::errors::ErrorResponse),
        (status = 404, description = "No such evaluation", body = crate::errors::ErrorResponse),
    )
)]
#[put("/{id}")]
pub async fn update_evaluation(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    id: web::Path<String>,
    request: web::Json<UpdateEvaluationRequest>,
) -> Result<HttpResponse, AppError> {
    let evaluation = state
        .evaluation_service
        .update(&auth.0, &id, request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(EvaluationResponse {
        message: "Evaluation updated".to_string(),
        evaluation: evaluation.into(),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/evaluations/{id}",
    tag = "Evaluations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Evaluation id")),
    responses(
        (status = 200, description = "Evaluation deleted", body = MessageResponse),
        (status = 403, description = "Not the owner", body = crate::errors::ErrorResponse),
        (status = 404, description = "No such evaluation", body = crate::errors::ErrorResponse),
    )
)]
#[delete("/{id}")]
pub async fn delete_evaluation(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.evaluation_service.delete(&auth.0, &id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Evaluation deleted".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service is up"))
)]
#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}
