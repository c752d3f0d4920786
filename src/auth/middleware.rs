use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures::future::LocalBoxFuture;

use crate::{app_state::AppState, errors::AppError, models::domain::User};

/// Authentication guard for protected scopes. Every request re-verifies
/// the bearer token and re-resolves the subject against the user store;
/// nothing is cached across requests.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let auth = async {
                let state = req
                    .app_data::<web::Data<AppState>>()
                    .cloned()
                    .ok_or_else(|| {
                        AppError::Internal("Application state not configured".to_string())
                    })?;

                // Extract token from Authorization header
                let auth_header = req
                    .headers()
                    .get(AUTHORIZATION)
                    .and_then(|h| h.to_str().ok())
                    .ok_or_else(|| {
                        AppError::Unauthenticated("Access token required".to_string())
                    })?;

                let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
                    AppError::Unauthenticated("Access token required".to_string())
                })?;

                let claims = state.jwt_service.validate_token(token)?;

                // Resolve the subject to a live user; a deleted account fails here
                let user = state
                    .identity_service
                    .resolve(&claims.sub)
                    .await?
                    .ok_or_else(|| {
                        AppError::Unauthenticated("User no longer exists".to_string())
                    })?;

                Ok::<User, AppError>(user)
            }
            .await;

            match auth {
                Ok(user) => {
                    req.extensions_mut().insert(user);

                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => {
                    let response = err.error_response().map_into_right_body();
                    Ok(req.into_response(response))
                }
            }
        })
    }
}

/// Extractor handing the resolved identity to handlers behind the guard.
pub struct AuthenticatedUser(pub User);

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req
            .extensions()
            .get::<User>()
            .cloned()
            .ok_or_else(|| AppError::Unauthenticated("Not authenticated".to_string()));

        ready(user.map(AuthenticatedUser))
    }
}
