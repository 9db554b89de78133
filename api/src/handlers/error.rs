//! Error to HTTP response mapping
//!
//! Translates the domain error taxonomy into HTTP responses. The status
//! code always reflects the outcome; the body keeps the
//! `{success: false, message}` envelope that the storefront keys on.

use actix_web::HttpResponse;
use validator::ValidationErrors;

use bv_core::errors::{AuthError, DomainError, TokenError};
use bv_shared::errors::{error_codes, ErrorResponse};

/// Maps a domain error to the HTTP response for the caller.
///
/// Internal failures are logged with their detail and answered with a
/// generic message; nothing from the store or hasher leaks to the client.
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Auth(auth_error) => handle_auth_error(auth_error),
        DomainError::Token(token_error) => handle_token_error(token_error),
        DomainError::ValidationErr(validation_error) => HttpResponse::BadRequest().json(
            ErrorResponse::new(error_codes::VALIDATION_ERROR, validation_error.to_string()),
        ),
        DomainError::Validation { message } => HttpResponse::BadRequest()
            .json(ErrorResponse::new(error_codes::VALIDATION_ERROR, message)),
        DomainError::NotFound { resource } => HttpResponse::NotFound().json(ErrorResponse::new(
            error_codes::NOT_FOUND,
            format!("{} not found", resource),
        )),
        DomainError::Unauthorized => HttpResponse::Unauthorized().json(ErrorResponse::new(
            error_codes::UNAUTHORIZED,
            "Authentication required",
        )),
        DomainError::Internal { message } => {
            log::error!("Internal error: {}", message);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                error_codes::INTERNAL_ERROR,
                "An internal server error occurred",
            ))
        }
    }
}

fn handle_auth_error(error: &AuthError) -> HttpResponse {
    match error {
        AuthError::EmailExists => HttpResponse::Conflict()
            .json(ErrorResponse::new(error_codes::CONFLICT, error.to_string())),
        AuthError::EmailNotRegistered | AuthError::PhoneNotRegistered | AuthError::UserNotFound => {
            HttpResponse::NotFound()
                .json(ErrorResponse::new(error_codes::NOT_FOUND, error.to_string()))
        }
        AuthError::InvalidPassword => HttpResponse::Unauthorized().json(ErrorResponse::new(
            error_codes::UNAUTHORIZED,
            error.to_string(),
        )),
        AuthError::IdentityMismatch => HttpResponse::Unauthorized().json(ErrorResponse::new(
            error_codes::IDENTITY_MISMATCH,
            error.to_string(),
        )),
        AuthError::InvalidVerificationCode => HttpResponse::Unauthorized().json(
            ErrorResponse::new(error_codes::VERIFICATION_CODE_INVALID, error.to_string()),
        ),
        AuthError::VerificationCodeExpired => HttpResponse::Unauthorized().json(
            ErrorResponse::new(error_codes::VERIFICATION_CODE_EXPIRED, error.to_string()),
        ),
        AuthError::MaxAttemptsExceeded => HttpResponse::TooManyRequests().json(
            ErrorResponse::new(error_codes::TOO_MANY_ATTEMPTS, error.to_string()),
        ),
        AuthError::ResendCooldown { seconds } => HttpResponse::TooManyRequests().json(
            ErrorResponse::new(error_codes::RESEND_COOLDOWN, error.to_string())
                .add_detail("retryAfterSecs", seconds),
        ),
        AuthError::InsufficientPermissions => HttpResponse::Forbidden().json(ErrorResponse::new(
            error_codes::FORBIDDEN,
            error.to_string(),
        )),
    }
}

/// Token errors are answered 401 across the board so a caller cannot
/// distinguish tampering from expiry. Generation failure is the one
/// exception; that is a server-side fault.
fn handle_token_error(error: &TokenError) -> HttpResponse {
    match error {
        TokenError::TokenExpired => HttpResponse::Unauthorized().json(ErrorResponse::new(
            error_codes::TOKEN_EXPIRED,
            error.to_string(),
        )),
        TokenError::TokenGenerationFailed => {
            log::error!("Token generation failed");
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                error_codes::INTERNAL_ERROR,
                "An internal server error occurred",
            ))
        }
        TokenError::InvalidTokenFormat
        | TokenError::InvalidSignature
        | TokenError::TokenNotYetValid
        | TokenError::InvalidClaims => HttpResponse::Unauthorized().json(ErrorResponse::new(
            error_codes::TOKEN_INVALID,
            error.to_string(),
        )),
    }
}

/// Maps request DTO validation failures to a 400 response.
///
/// The first configured message wins; requests failing several rules at
/// once still get a single, readable complaint.
pub fn handle_validation_errors(errors: &ValidationErrors) -> HttpResponse {
    let message = errors
        .field_errors()
        .into_iter()
        .flat_map(|(_, field_errors)| field_errors.iter())
        .filter_map(|error| error.message.as_ref().map(|message| message.to_string()))
        .next()
        .unwrap_or_else(|| "Invalid request data".to_string());

    log::warn!("Request validation failed: {}", message);

    HttpResponse::BadRequest().json(ErrorResponse::new(error_codes::VALIDATION_ERROR, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use bv_core::errors::ValidationError;

    #[actix_web::test]
    async fn test_duplicate_email_maps_to_conflict() {
        let response = handle_domain_error(&DomainError::Auth(AuthError::EmailExists));
        assert_eq!(response.status(), 409);

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Email already registered, please login");
    }

    #[actix_web::test]
    async fn test_unknown_email_maps_to_not_found() {
        let response = handle_domain_error(&DomainError::Auth(AuthError::EmailNotRegistered));
        assert_eq!(response.status(), 404);
    }

    #[actix_web::test]
    async fn test_wrong_password_maps_to_unauthorized() {
        let response = handle_domain_error(&DomainError::Auth(AuthError::InvalidPassword));
        assert_eq!(response.status(), 401);
    }

    #[actix_web::test]
    async fn test_insufficient_role_maps_to_forbidden() {
        let response =
            handle_domain_error(&DomainError::Auth(AuthError::InsufficientPermissions));
        assert_eq!(response.status(), 403);
    }

    #[actix_web::test]
    async fn test_cooldown_maps_to_too_many_requests_with_detail() {
        let response =
            handle_domain_error(&DomainError::Auth(AuthError::ResendCooldown { seconds: 42 }));
        assert_eq!(response.status(), 429);

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["details"]["retryAfterSecs"], 42);
    }

    #[actix_web::test]
    async fn test_expired_token_maps_to_unauthorized() {
        let response = handle_domain_error(&DomainError::Token(TokenError::TokenExpired));
        assert_eq!(response.status(), 401);
    }

    #[actix_web::test]
    async fn test_internal_error_hides_detail() {
        let response = handle_domain_error(&DomainError::Internal {
            message: "connection pool exhausted".to_string(),
        });
        assert_eq!(response.status(), 500);

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "An internal server error occurred");
    }

    #[actix_web::test]
    async fn test_validation_error_maps_to_bad_request() {
        let error = ValidationError::RequiredField {
            field: "name".to_string(),
        };
        let response = handle_domain_error(&error.into());
        assert_eq!(response.status(), 400);

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Required field: name");
    }
}
