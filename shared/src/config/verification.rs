//! Verification code configuration module

use serde::{Deserialize, Serialize};

/// Verification code lifecycle configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Code time-to-live in minutes
    pub code_expiration_minutes: i64,

    /// Cooldown before a code may be re-sent, in seconds
    pub resend_cooldown_seconds: i64,

    /// Failed verification attempts allowed before the code is invalidated
    pub max_attempts: u32,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: 5,
            resend_cooldown_seconds: 60,
            max_attempts: 3,
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let code_expiration_minutes = std::env::var("VERIFICATION_CODE_TTL_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.code_expiration_minutes);
        let resend_cooldown_seconds = std::env::var("VERIFICATION_RESEND_COOLDOWN_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.resend_cooldown_seconds);
        let max_attempts = std::env::var("VERIFICATION_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_attempts);

        Self {
            code_expiration_minutes,
            resend_cooldown_seconds,
            max_attempts,
        }
    }
}
