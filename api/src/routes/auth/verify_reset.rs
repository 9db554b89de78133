use actix_web::{web, HttpResponse};
use validator::Validate;

use bv_core::domain::entities::verification_code::DeliveryMethod;
use bv_core::errors::ValidationError;
use bv_core::repositories::UserRepository;
use bv_core::services::verification::{CodeDelivery, CodeStore};
use bv_shared::utils::{mask_email, mask_phone};

use crate::app::AppState;
use crate::dto::auth::{MessageResponse, VerifyResetRequest};
use crate::handlers::{handle_domain_error, handle_validation_errors};

/// Handler for POST /api/v1/auth/verify-reset
///
/// Completes a code-based password reset. The code is verified and
/// consumed before the password changes, so a submitted code can never
/// authorize two resets. Wrong codes answer 401; a spent attempt budget
/// answers 429.
pub async fn verify_reset<R, D, C>(
    state: web::Data<AppState<R, D, C>>,
    request: web::Json<VerifyResetRequest>,
) -> HttpResponse
where
    R: UserRepository + 'static,
    D: CodeDelivery + 'static,
    C: CodeStore + 'static,
{
    if let Err(validation_errors) = request.0.validate() {
        return handle_validation_errors(&validation_errors);
    }

    // The channel is inferred from the target supplied; phone wins when
    // both fields are present.
    let (method, target) = match (request.phone.as_deref(), request.email.as_deref()) {
        (Some(phone), _) if !phone.is_empty() => (DeliveryMethod::Phone, phone),
        (_, Some(email)) if !email.is_empty() => (DeliveryMethod::Email, email),
        _ => {
            let error = ValidationError::RequiredField {
                field: "email or phone".to_string(),
            };
            return handle_domain_error(&error.into());
        }
    };

    let masked = match method {
        DeliveryMethod::Email => mask_email(target),
        DeliveryMethod::Phone => mask_phone(target),
    };

    match state
        .credential_service
        .reset_password_with_code(method, target, &request.verification_code, &request.new_password)
        .await
    {
        Ok(()) => {
            log::info!("Code-based reset completed for {}", masked);
            HttpResponse::Ok().json(MessageResponse {
                success: true,
                message: "Password reset successfully".to_string(),
            })
        }
        Err(error) => {
            log::warn!("Code-based reset for {} failed: {}", masked, error);
            handle_domain_error(&error)
        }
    }
}
