pub mod auth_handler;
pub mod evaluation_handler;

use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{auth::AuthMiddleware, openapi::ApiDoc};

pub use evaluation_handler::health_check;

/// Route table for the whole API. Shared by `main` and the HTTP tests so
/// both run the exact same wiring, including the authentication guard.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(
            SwaggerUi::new("/api-docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .service(
            web::scope("/api/auth")
                .service(auth_handler::register)
                .service(auth_handler::login)
                .service(
                    web::scope("")
                        .wrap(AuthMiddleware)
                        .service(auth_handler::profile),
                ),
        )
        .service(
            web::scope("/api/evaluations")
                .wrap(AuthMiddleware)
                .service(evaluation_handler::create_evaluation)
                .service(evaluation_handler::list_evaluations)
                .service(evaluation_handler::get_evaluation)
                .service(evaluation_handler::update_evaluation)
                .service(evaluation_handler::delete_evaluation),
        );
}
