use actix_web::{web, HttpResponse};
use validator::Validate;

use bv_core::repositories::UserRepository;
use bv_core::services::verification::{CodeDelivery, CodeStore};
use bv_shared::utils::mask_email;

use crate::app::AppState;
use crate::dto::auth::{ForgotPasswordRequest, MessageResponse};
use crate::handlers::{handle_domain_error, handle_validation_errors};

/// Handler for POST /api/v1/auth/forgot-password
///
/// Resets the password for callers who can prove the security answer.
/// Both the email and the answer must resolve to the same identity;
/// changing either alone fails. No session is required, this is how
/// locked-out users get back in.
pub async fn forgot_password<R, D, C>(
    state: web::Data<AppState<R, D, C>>,
    request: web::Json<ForgotPasswordRequest>,
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
        .reset_password_with_answer(&request.email, &request.answer, &request.new_password)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse {
            success: true,
            message: "Password reset successfully".to_string(),
        }),
        Err(error) => {
            log::warn!(
                "Answer-based reset failed for {}: {}",
                mask_email(&request.email),
                error
            );
            handle_domain_error(&error)
        }
    }
}
