//! Session and role guards for protected endpoints.
//!
//! `SessionGuard` extracts the bearer token from the Authorization
//! header, verifies it, and injects an [`AuthContext`] into the request.
//! `AdminGuard` runs behind it and checks the caller's role against the
//! credential store on every request, so a demoted administrator loses
//! access immediately even though their token is still valid.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};
use uuid::Uuid;

use bv_core::domain::entities::token::Claims;
use bv_core::domain::entities::user::UserRole;
use bv_core::errors::{AuthError, DomainError, DomainResult, TokenError};
use bv_core::repositories::UserRepository;
use bv_core::services::token::TokenService;
use bv_shared::errors::{error_codes, ErrorResponse};

use crate::handlers::error::handle_domain_error;

/// Authenticated caller context injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User ID extracted from the verified token's `sub` claim
    pub user_id: Uuid,
}

impl AuthContext {
    /// Creates an authentication context from verified claims
    pub fn from_claims(claims: &Claims) -> Result<Self, DomainError> {
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidClaims))?;
        Ok(Self { user_id })
    }
}

/// Role source backing the admin guard.
///
/// The role is read from the store on every guarded request rather than
/// from the token, so role changes take effect without reissuing tokens.
#[async_trait::async_trait]
pub trait RoleLookup: Send + Sync {
    /// Returns the role of the given user, or `None` when no such user exists
    async fn role_of(&self, user_id: Uuid) -> DomainResult<Option<UserRole>>;
}

#[async_trait::async_trait]
impl<R: UserRepository> RoleLookup for R {
    async fn role_of(&self, user_id: Uuid) -> DomainResult<Option<UserRole>> {
        Ok(self.find_by_id(user_id).await?.map(|user| user.role))
    }
}

/// Session guard middleware factory
///
/// Rejects requests without a valid bearer token with a 401 JSON body.
pub struct SessionGuard;

impl<S, B> Transform<S, ServiceRequest> for SessionGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGuardMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Session guard middleware service
pub struct SessionGuardMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    let response = HttpResponse::Unauthorized().json(ErrorResponse::new(
                        error_codes::UNAUTHORIZED,
                        "Authentication required",
                    ));
                    return Ok(guard_response(req, response));
                }
            };

            let verifier = match req.app_data::<web::Data<TokenService>>() {
                Some(verifier) => verifier,
                None => {
                    log::error!("SessionGuard mounted without a TokenService in app data");
                    let response = HttpResponse::InternalServerError().json(ErrorResponse::new(
                        error_codes::INTERNAL_ERROR,
                        "An internal server error occurred",
                    ));
                    return Ok(guard_response(req, response));
                }
            };

            let context = match verifier
                .verify_session_token(&token)
                .and_then(|claims| AuthContext::from_claims(&claims))
            {
                Ok(context) => context,
                Err(error) => {
                    log::warn!("Rejected session token: {}", error);
                    return Ok(guard_response(req, handle_domain_error(&error)));
                }
            };

            req.extensions_mut().insert(context);

            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Admin role guard middleware factory
///
/// Must be mounted behind [`SessionGuard`]; it reads the [`AuthContext`]
/// the session guard injected. Non-administrative callers get a 403.
pub struct AdminGuard;

impl<S, B> Transform<S, ServiceRequest> for AdminGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminGuardMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Admin role guard middleware service
pub struct AdminGuardMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AdminGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let context = req.extensions().get::<AuthContext>().cloned();
            let context = match context {
                Some(context) => context,
                None => {
                    let response = HttpResponse::Unauthorized().json(ErrorResponse::new(
                        error_codes::UNAUTHORIZED,
                        "Authentication required",
                    ));
                    return Ok(guard_response(req, response));
                }
            };

            let roles = match req.app_data::<web::Data<dyn RoleLookup>>() {
                Some(roles) => roles.clone(),
                None => {
                    log::error!("AdminGuard mounted without a RoleLookup in app data");
                    let response = HttpResponse::InternalServerError().json(ErrorResponse::new(
                        error_codes::INTERNAL_ERROR,
                        "An internal server error occurred",
                    ));
                    return Ok(guard_response(req, response));
                }
            };

            match roles.role_of(context.user_id).await {
                Ok(Some(role)) if role.is_admin() => {}
                Ok(Some(_)) => {
                    let error = DomainError::Auth(AuthError::InsufficientPermissions);
                    return Ok(guard_response(req, handle_domain_error(&error)));
                }
                Ok(None) => {
                    // The token outlived the account; refuse the session
                    log::warn!("Session for missing user {}", context.user_id);
                    return Ok(guard_response(req, handle_domain_error(&DomainError::Unauthorized)));
                }
                Err(error) => {
                    return Ok(guard_response(req, handle_domain_error(&error)));
                }
            }

            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Builds an early guard response without touching the inner service
fn guard_response<B>(req: ServiceRequest, response: HttpResponse) -> ServiceResponse<EitherBody<B>> {
    let (request, _payload) = req.into_parts();
    ServiceResponse::new(request, response.map_into_right_body())
}

/// Extracts the bearer token from the Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        use actix_web::test;

        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer session_token_123"))
            .to_srv_request();

        assert_eq!(
            extract_bearer_token(&req),
            Some("session_token_123".to_string())
        );

        let req_no_bearer = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "session_token_123"))
            .to_srv_request();

        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_no_header = test::TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }

    #[test]
    fn test_auth_context_from_claims() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new_session_token(user_id);

        let context = AuthContext::from_claims(&claims).unwrap();
        assert_eq!(context.user_id, user_id);
    }
}
