use actix_web::{web, HttpResponse};
use validator::Validate;

use bv_core::repositories::UserRepository;
use bv_core::services::verification::{CodeDelivery, CodeStore};

use crate::app::AppState;
use crate::dto::auth::{ProfileResponse, UpdateProfileRequest, UserDto};
use crate::handlers::{handle_domain_error, handle_validation_errors};
use crate::middleware::auth::AuthContext;

/// Handler for PUT /api/v1/auth/profile
///
/// Updates any subset of name, password, phone, and address for the
/// authenticated user. The email address is immutable through this
/// endpoint. A supplied password goes through the same policy check as
/// at registration.
pub async fn update_profile<R, D, C>(
    state: web::Data<AppState<R, D, C>>,
    auth: AuthContext,
    request: web::Json<UpdateProfileRequest>,
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
        .update_profile(
            auth.user_id,
            request.name.as_deref(),
            request.password.as_deref(),
            request.phone.as_deref(),
            request.address.as_deref(),
        )
        .await
    {
        Ok(user) => HttpResponse::Ok().json(ProfileResponse {
            success: true,
            message: "Profile updated successfully".to_string(),
            updated_user: UserDto::from(&user),
        }),
        Err(error) => {
            log::warn!("Profile update for {} failed: {}", auth.user_id, error);
            handle_domain_error(&error)
        }
    }
}
