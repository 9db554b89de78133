use actix_web::{web, HttpResponse};
use chrono::Utc;

use bv_core::domain::entities::verification_code::DeliveryMethod;
use bv_core::errors::ValidationError;
use bv_core::repositories::UserRepository;
use bv_core::services::verification::{CodeDelivery, CodeStore};
use bv_shared::utils::{mask_email, mask_phone};

use crate::app::AppState;
use crate::dto::auth::{SendVerificationRequest, SendVerificationResponse};
use crate::handlers::handle_domain_error;

/// Handler for POST /api/v1/auth/send-verification
///
/// Dispatches a recovery code to a registered email address or phone
/// number. Unknown targets answer 404 before any code is generated, and
/// a target still inside the resend cooldown answers 429.
///
/// # Request Body
///
/// ```json
/// {
///     "phone": "5551234567",
///     "method": "phone"
/// }
/// ```
///
/// # Response
///
/// `200 OK` with `{success, message, resendAfterSecs}`.
pub async fn send_verification<R, D, C>(
    state: web::Data<AppState<R, D, C>>,
    request: web::Json<SendVerificationRequest>,
) -> HttpResponse
where
    R: UserRepository + 'static,
    D: CodeDelivery + 'static,
    C: CodeStore + 'static,
{
    if request.method.is_empty() {
        let error = ValidationError::RequiredField {
            field: "method".to_string(),
        };
        return handle_domain_error(&error.into());
    }

    let method = match request.method.parse::<DeliveryMethod>() {
        Ok(method) => method,
        Err(_) => {
            let error = ValidationError::InvalidFormat {
                field: "method".to_string(),
            };
            return handle_domain_error(&error.into());
        }
    };

    let target = match method {
        DeliveryMethod::Email => request.email.as_deref(),
        DeliveryMethod::Phone => request.phone.as_deref(),
    };
    let target = match target {
        Some(target) if !target.is_empty() => target,
        _ => {
            let error = ValidationError::RequiredField {
                field: method.as_str().to_string(),
            };
            return handle_domain_error(&error.into());
        }
    };

    let masked = match method {
        DeliveryMethod::Email => mask_email(target),
        DeliveryMethod::Phone => mask_phone(target),
    };

    match state.credential_service.send_recovery_code(method, target).await {
        Ok(result) => {
            let resend_after_secs = (result.next_resend_at - Utc::now()).num_seconds().max(0);
            log::info!("Recovery code dispatched to {}", masked);
            HttpResponse::Ok().json(SendVerificationResponse {
                success: true,
                message: "Verification code sent".to_string(),
                resend_after_secs,
            })
        }
        Err(error) => {
            log::warn!("Recovery code dispatch to {} failed: {}", masked, error);
            handle_domain_error(&error)
        }
    }
}
