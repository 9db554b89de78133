use actix_web::{web, HttpResponse};
use validator::Validate;

use bv_core::repositories::UserRepository;
use bv_core::services::verification::{CodeDelivery, CodeStore};
use bv_shared::utils::mask_email;

use crate::app::AppState;
use crate::dto::auth::{LoginRequest, LoginResponse, UserDto};
use crate::handlers::{handle_domain_error, handle_validation_errors};

/// Handler for POST /api/v1/auth/login
///
/// Checks the password against the stored hash and issues a session
/// token. Unknown emails answer 404; a wrong password answers 401
/// without echoing anything about the account.
///
/// # Response
///
/// `200 OK` with `{success, message, user, token}`.
pub async fn login<R, D, C>(
    state: web::Data<AppState<R, D, C>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    R: UserRepository + 'static,
    D: CodeDelivery + 'static,
    C: CodeStore + 'static,
{
    if let Err(validation_errors) = request.0.validate() {
        return handle_validation_errors(&validation_errors);
    }

    match state
        .credential_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(outcome) => HttpResponse::Ok().json(LoginResponse {
            success: true,
            message: "Login successful".to_string(),
            user: UserDto::from(&outcome.user),
            token: outcome.token.token,
        }),
        Err(error) => {
            log::warn!("Login failed for {}: {}", mask_email(&request.email), error);
            handle_domain_error(&error)
        }
    }
}
