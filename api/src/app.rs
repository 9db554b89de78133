//! Application state and factory
//!
//! This module owns the shared application state and the factory that
//! assembles the Actix app: routes, guards, CORS, and access logging.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error, HttpResponse,
};

use bv_core::repositories::UserRepository;
use bv_core::services::credential::CredentialService;
use bv_core::services::token::TokenService;
use bv_core::services::verification::{CodeDelivery, CodeStore};
use bv_shared::errors::{error_codes, ErrorResponse};

use crate::middleware::auth::{AdminGuard, RoleLookup, SessionGuard};
use crate::middleware::cors::create_cors;
use crate::routes::auth::{
    admin_auth, forgot_password, login, register, send_verification, update_profile, user_auth,
    verify_reset,
};

/// Application state that holds shared services
pub struct AppState<R, D, C>
where
    R: UserRepository,
    D: CodeDelivery,
    C: CodeStore,
{
    /// Credential lifecycle service behind every auth endpoint
    pub credential_service: Arc<CredentialService<R, D, C>>,
    /// Session token verifier used by the guards
    pub token_service: Arc<TokenService>,
    /// Repository the admin guard reads roles from
    pub user_repository: Arc<R>,
}

impl<R, D, C> Clone for AppState<R, D, C>
where
    R: UserRepository,
    D: CodeDelivery,
    C: CodeStore,
{
    fn clone(&self) -> Self {
        Self {
            credential_service: Arc::clone(&self.credential_service),
            token_service: Arc::clone(&self.token_service),
            user_repository: Arc::clone(&self.user_repository),
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<R, D, C>(
    state: AppState<R, D, C>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    R: UserRepository + 'static,
    D: CodeDelivery + 'static,
    C: CodeStore + 'static,
{
    let cors = create_cors();

    // The guards resolve these through app data so they stay
    // non-generic over the repository type.
    let token_verifier = web::Data::from(Arc::clone(&state.token_service));
    let role_lookup: Arc<dyn RoleLookup> = Arc::clone(&state.user_repository) as Arc<dyn RoleLookup>;
    let role_lookup = web::Data::from(role_lookup);

    App::new()
        .app_data(web::Data::new(state))
        .app_data(token_verifier)
        .app_data(role_lookup)
        .wrap(Logger::default())
        .wrap(cors)
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/register", web::post().to(register::<R, D, C>))
                    .route("/login", web::post().to(login::<R, D, C>))
                    .route(
                        "/forgot-password",
                        web::post().to(forgot_password::<R, D, C>),
                    )
                    .route(
                        "/send-verification",
                        web::post().to(send_verification::<R, D, C>),
                    )
                    .route("/verify-reset", web::post().to(verify_reset::<R, D, C>))
                    .route(
                        "/profile",
                        web::put().to(update_profile::<R, D, C>).wrap(SessionGuard),
                    )
                    .route("/user-auth", web::get().to(user_auth).wrap(SessionGuard))
                    // The guard registered last runs first, so the session
                    // check precedes the role check.
                    .route(
                        "/admin-auth",
                        web::get().to(admin_auth).wrap(AdminGuard).wrap(SessionGuard),
                    ),
            ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "bookverse-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
