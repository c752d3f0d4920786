mod common;

use common::test_state;

use evaluation_server::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{
        CreateEvaluationRequest, LoginRequest, PaginationParams, RegisterRequest,
        UpdateEvaluationRequest,
    },
    models::dto::response::AuthResponse,
};

fn register_request(email: &str, role: Option<&str>) -> RegisterRequest {
    RegisterRequest {
        email: email.to_string(),
        password: "secret123".to_string(),
        name: "Test User".to_string(),
        role: role.map(str::to_string),
    }
}

fn create_request(title: &str) -> CreateEvaluationRequest {
    CreateEvaluationRequest {
        title: title.to_string(),
        description: None,
        score: None,
        status: None,
    }
}

fn pagination(page: i64, limit: i64) -> PaginationParams {
    serde_json::from_value(serde_json::json!({
        "page": page.to_string(),
        "limit": limit.to_string(),
    }))
    .unwrap()
}

async fn register(state: &AppState, email: &str, role: Option<&str>) -> AuthResponse {
    state
        .identity_service
        .register(register_request(email, role))
        .await
        .unwrap()
}

async fn resolve_user(state: &AppState, auth: &AuthResponse) -> evaluation_server::models::domain::User {
    state
        .identity_service
        .resolve(&auth.user.id)
        .await
        .unwrap()
        .unwrap()
}

#[actix_rt::test]
async fn registration_token_resolves_to_the_new_identity() {
    let state = test_state();
    let auth = register(&state, "fresh@example.com", None).await;

    let claims = state.jwt_service.validate_token(&auth.token).unwrap();
    assert_eq!(claims.sub, auth.user.id);

    let user = state.identity_service.resolve(&claims.sub).await.unwrap();
    assert_eq!(user.unwrap().email, "fresh@example.com");
}

#[actix_rt::test]
async fn duplicate_registration_yields_conflict() {
    let state = test_state();
    register(&state, "dup@example.com", None).await;

    let result = state
        .identity_service
        .register(register_request("dup@example.com", None))
        .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[actix_rt::test]
async fn login_failures_are_indistinguishable() {
    let state = test_state();
    register(&state, "known@example.com", None).await;

    let wrong_password = state
        .identity_service
        .login(LoginRequest {
            email: "known@example.com".to_string(),
            password: "wrong-password".to_string(),
        })
        .await
        .unwrap_err();

    let unknown_email = state
        .identity_service
        .login(LoginRequest {
            email: "nobody@example.com".to_string(),
            password: "secret123".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(wrong_password, AppError::Unauthenticated(_)));
    assert!(matches!(unknown_email, AppError::Unauthenticated(_)));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[actix_rt::test]
async fn login_returns_token_for_valid_credentials() {
    let state = test_state();
    register(&state, "login@example.com", None).await;

    let auth = state
        .identity_service
        .login(LoginRequest {
            email: "login@example.com".to_string(),
            password: "secret123".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(auth.message, "Login successful");
    let claims = state.jwt_service.validate_token(&auth.token).unwrap();
    assert_eq!(claims.sub, auth.user.id);
}

#[actix_rt::test]
async fn ownership_matrix_for_single_resource_operations() {
    let state = test_state();
    let owner = resolve_user(&state, &register(&state, "owner@example.com", None).await).await;
    let other = resolve_user(&state, &register(&state, "other@example.com", None).await).await;
    let admin = resolve_user(&state, &register(&state, "admin@example.com", Some("admin")).await).await;

    let evaluation = state
        .evaluation_service
        .create(&owner, create_request("Owned record"))
        .await
        .unwrap();
    let id = evaluation.id.to_hex();

    // Non-owner, non-admin: forbidden on every single-resource operation
    let get = state.evaluation_service.get_by_id(&other, &id).await;
    assert!(matches!(get, Err(AppError::Forbidden(_))));

    let update = state
        .evaluation_service
        .update(&other, &id, UpdateEvaluationRequest::default())
        .await;
    assert!(matches!(update, Err(AppError::Forbidden(_))));

    let delete = state.evaluation_service.delete(&other, &id).await;
    assert!(matches!(delete, Err(AppError::Forbidden(_))));

    // Admin: allowed on all of them
    assert!(state.evaluation_service.get_by_id(&admin, &id).await.is_ok());
    assert!(state
        .evaluation_service
        .update(
            &admin,
            &id,
            UpdateEvaluationRequest {
                score: Some(80.0),
                ..Default::default()
            }
        )
        .await
        .is_ok());
    assert!(state.evaluation_service.delete(&admin, &id).await.is_ok());
}

#[actix_rt::test]
async fn missing_record_is_not_found_even_for_non_owners() {
    let state = test_state();
    let user = resolve_user(&state, &register(&state, "user@example.com", None).await).await;

    let result = state
        .evaluation_service
        .get_by_id(&user, "64b000000000000000000000")
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    // Malformed ids report the same way
    let result = state.evaluation_service.get_by_id(&user, "not-an-id").await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[actix_rt::test]
async fn list_scopes_to_owner_unless_admin() {
    let state = test_state();
    let alice = resolve_user(&state, &register(&state, "alice@example.com", None).await).await;
    let bob = resolve_user(&state, &register(&state, "bob@example.com", None).await).await;
    let admin = resolve_user(&state, &register(&state, "root@example.com", Some("admin")).await).await;

    for i in 0..3 {
        state
            .evaluation_service
            .create(&alice, create_request(&format!("Alice {}", i)))
            .await
            .unwrap();
    }
    state
        .evaluation_service
        .create(&bob, create_request("Bob 0"))
        .await
        .unwrap();

    let alice_list = state
        .evaluation_service
        .list(&alice, &PaginationParams::default())
        .await
        .unwrap();
    assert_eq!(alice_list.pagination.total_items, 3);
    assert!(alice_list
        .evaluations
        .iter()
        .all(|e| e.created_by == alice.id.to_hex()));

    let admin_list = state
        .evaluation_service
        .list(&admin, &PaginationParams::default())
        .await
        .unwrap();
    assert_eq!(admin_list.pagination.total_items, 4);
}

#[actix_rt::test]
async fn pagination_windows_over_25_records() {
    let state = test_state();
    let user = resolve_user(&state, &register(&state, "pager@example.com", None).await).await;

    for i in 0..25 {
        state
            .evaluation_service
            .create(&user, create_request(&format!("Record {}", i)))
            .await
            .unwrap();
    }

    let page1 = state
        .evaluation_service
        .list(&user, &pagination(1, 10))
        .await
        .unwrap();
    assert_eq!(page1.evaluations.len(), 10);
    assert_eq!(page1.pagination.current_page, 1);
    assert_eq!(page1.pagination.total_pages, 3);
    assert_eq!(page1.pagination.total_items, 25);
    assert_eq!(page1.pagination.items_per_page, 10);

    let page2 = state
        .evaluation_service
        .list(&user, &pagination(2, 10))
        .await
        .unwrap();
    assert_eq!(page2.evaluations.len(), 10);

    let page3 = state
        .evaluation_service
        .list(&user, &pagination(3, 10))
        .await
        .unwrap();
    assert_eq!(page3.evaluations.len(), 5);

    // Pages are disjoint
    let seen: std::collections::HashSet<String> = page1
        .evaluations
        .iter()
        .chain(&page2.evaluations)
        .chain(&page3.evaluations)
        .map(|e| e.id.clone())
        .collect();
    assert_eq!(seen.len(), 25);
}

#[actix_rt::test]
async fn create_rejects_invalid_input_with_field_details() {
    let state = test_state();
    let user = resolve_user(&state, &register(&state, "val@example.com", None).await).await;

    let cases = [
        (create_request("   "), "title"),
        (
            CreateEvaluationRequest {
                score: Some(150.0),
                ..create_request("Scored")
            },
            "score",
        ),
        (
            CreateEvaluationRequest {
                status: Some("bogus".to_string()),
                ..create_request("Statused")
            },
            "status",
        ),
    ];

    for (request, field) in cases {
        let result = state.evaluation_service.create(&user, request).await;
        match result {
            Err(AppError::Validation(violations)) => {
                assert!(violations.iter().any(|v| v.field == field));
            }
            other => panic!(
                "expected validation error on {}, got {:?}",
                field,
                other.map(|e| e.title)
            ),
        }
    }
}

#[actix_rt::test]
async fn full_lifecycle_round_trip() {
    let state = test_state();

    // register -> login
    register(&state, "cycle@example.com", None).await;
    let auth = state
        .identity_service
        .login(LoginRequest {
            email: "cycle@example.com".to_string(),
            password: "secret123".to_string(),
        })
        .await
        .unwrap();
    let user = resolve_user(&state, &auth).await;

    // create
    let created = state
        .evaluation_service
        .create(
            &user,
            CreateEvaluationRequest {
                title: "Lifecycle".to_string(),
                description: Some("end to end".to_string()),
                score: Some(50.0),
                status: None,
            },
        )
        .await
        .unwrap();
    let id = created.id.to_hex();

    // list (own)
    let listed = state
        .evaluation_service
        .list(&user, &PaginationParams::default())
        .await
        .unwrap();
    assert_eq!(listed.evaluations.len(), 1);
    assert_eq!(listed.evaluations[0].id, id);

    // update status to completed
    let updated = state
        .evaluation_service
        .update(
            &user,
            &id,
            UpdateEvaluationRequest {
                status: Some("completed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(
        updated.status,
        evaluation_server::models::domain::EvaluationStatus::Completed
    );
    assert_eq!(updated.title, "Lifecycle");
    assert!(updated.updated_at >= updated.created_at);

    // delete, then getById reports NotFound
    state.evaluation_service.delete(&user, &id).await.unwrap();
    let result = state.evaluation_service.get_by_id(&user, &id).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}
