//! Domain-specific error types for authentication and account recovery
//!
//! This module provides error type definitions for credential, token, and
//! validation failures. The presentation layer maps these onto HTTP status
//! codes and response bodies.

use thiserror::Error;

/// Authentication and account-recovery errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Email already registered, please login")]
    EmailExists,

    #[error("Email is not registered")]
    EmailNotRegistered,

    #[error("Phone number is not registered")]
    PhoneNotRegistered,

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Identity details do not match our records")]
    IdentityMismatch,

    #[error("Invalid verification code")]
    InvalidVerificationCode,

    #[error("Verification code expired")]
    VerificationCodeExpired,

    #[error("Maximum verification attempts exceeded")]
    MaxAttemptsExceeded,

    #[error("Please wait {seconds} seconds before requesting a new code")]
    ResendCooldown { seconds: i64 },

    #[error("User not found")]
    UserNotFound,

    #[error("Insufficient permissions")]
    InsufficientPermissions,
}

/// Token-related errors
///
/// Verification fails closed: any of these yields an unauthenticated
/// request, never a partial identity.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Input validation errors
///
/// Rejected before any store access.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid length: {field} (expected: {expected}, actual: {actual})")]
    InvalidLength {
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Password is required and must be at least {min} characters long")]
    PasswordTooShort { min: usize },

    #[error("Password and confirmation do not match")]
    PasswordMismatch,
}
