use actix_web::{web, HttpResponse};
use validator::Validate;

use bv_core::repositories::UserRepository;
use bv_core::services::verification::{CodeDelivery, CodeStore};
use bv_shared::utils::mask_email;

use crate::app::AppState;
use crate::dto::auth::{RegisterRequest, RegisterResponse, UserDto};
use crate::handlers::{handle_domain_error, handle_validation_errors};

/// Handler for POST /api/v1/auth/register
///
/// Creates a new storefront account. The email must not already be
/// registered; the duplicate case answers 409.
///
/// # Request Body
///
/// ```json
/// {
///     "name": "Jordan Reed",
///     "email": "jordan@example.com",
///     "password": "sup3r",
///     "phone": "5551234567",
///     "address": "12 Shelf Lane",
///     "answer": "cycling"
/// }
/// ```
///
/// # Response
///
/// `201 Created` with `{success, message, user}`; the user payload never
/// carries the stored hashes.
pub async fn register<R, D, C>(
    state: web::Data<AppState<R, D, C>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    R: UserRepository + 'static,
    D: CodeDelivery + 'static,
    C: CodeStore + 'static,
{
    if let Err(validation_errors) = request.0.validate() {
        return handle_validation_errors(&validation_errors);
    }

    log::info!(
        "Processing registration for {}",
        mask_email(&request.email)
    );

    match state
        .credential_service
        .register(
            &request.name,
            &request.email,
            &request.phone,
            &request.address,
            &request.password,
            &request.answer,
        )
        .await
    {
        Ok(user) => HttpResponse::Created().json(RegisterResponse {
            success: true,
            message: "User registered successfully".to_string(),
            user: UserDto::from(&user),
        }),
        Err(error) => {
            log::warn!(
                "Registration failed for {}: {}",
                mask_email(&request.email),
                error
            );
            handle_domain_error(&error)
        }
    }
}
