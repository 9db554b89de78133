//! Configuration for the verification service

use crate::domain::entities::verification_code::{
    DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS, RESEND_COOLDOWN_SECONDS,
};

/// Configuration for the verification service
///
/// `code_expiration_minutes` must agree with the TTL the backing code
/// store applies, otherwise the resend cooldown window drifts.
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Number of minutes before a verification code expires
    pub code_expiration_minutes: i64,
    /// Minimum seconds between code resend requests
    pub resend_cooldown_seconds: i64,
    /// Maximum number of verification attempts allowed per code
    pub max_attempts: i32,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            resend_cooldown_seconds: RESEND_COOLDOWN_SECONDS,
            max_attempts: MAX_ATTEMPTS,
        }
    }
}
