//! Request and response DTOs for the auth endpoints.
//!
//! Wire field names are camelCase to match the storefront client.
//! Request DTOs default missing fields so the validation layer, not the
//! JSON deserializer, produces the failure message.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use bv_core::domain::entities::user::User;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Required field: name"))]
    pub name: String,

    #[validate(
        length(min = 1, message = "Required field: email"),
        email(message = "Invalid email")
    )]
    pub email: String,

    /// The storefront accepts passwords as short as three characters
    #[validate(length(
        min = 3,
        message = "Password is required and must be at least 3 characters long"
    ))]
    pub password: String,

    #[validate(length(min = 1, message = "Required field: phone"))]
    pub phone: String,

    #[validate(length(min = 1, message = "Required field: address"))]
    pub address: String,

    /// Security answer used for account recovery
    #[validate(length(min = 1, message = "Required field: answer"))]
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Required field: email"))]
    pub email: String,

    #[validate(length(min = 1, message = "Required field: password"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    #[validate(
        length(min = 1, message = "Required field: email"),
        email(message = "Invalid email")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "Required field: answer"))]
    pub answer: String,

    #[validate(length(
        min = 3,
        message = "Password is required and must be at least 3 characters long"
    ))]
    pub new_password: String,
}

/// Body for requesting a recovery code over one of the delivery channels.
///
/// Exactly one of `email` or `phone` is expected, matching `method`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct SendVerificationRequest {
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Delivery channel: "email" or "phone"
    pub method: String,
}

/// Body for completing a code-based reset.
///
/// The delivery channel is inferred from the target field present;
/// `phone` wins when both are supplied.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct VerifyResetRequest {
    pub email: Option<String>,
    pub phone: Option<String>,

    #[validate(length(equal = 6, message = "Verification code must be exactly 6 digits"))]
    pub verification_code: String,

    #[validate(length(
        min = 3,
        message = "Password is required and must be at least 3 characters long"
    ))]
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,

    #[validate(length(
        min = 3,
        message = "Password is required and must be at least 3 characters long"
    ))]
    pub password: Option<String>,

    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Sanitized user payload; the stored hashes never leave the server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub role: String,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            address: user.address.clone(),
            role: user.role.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub user: UserDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub user: UserDto,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendVerificationResponse {
    pub success: bool,
    pub message: String,
    /// Seconds until another code may be requested for this target
    pub resend_after_secs: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub success: bool,
    pub message: String,
    pub updated_user: UserDto,
}
