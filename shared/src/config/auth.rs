//! Authentication configuration

use serde::{Deserialize, Serialize};

/// Session token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Secret key for signing session tokens
    pub jwt_secret: String,

    /// Session token lifetime in days
    pub session_token_expiry_days: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::from("development-secret-please-change-in-production"),
            session_token_expiry_days: 7,
        }
    }
}

impl AuthConfig {
    /// Create a new auth configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: secret.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("JWT_SECRET")
            .unwrap_or_else(|_| "development-secret-please-change-in-production".to_string());
        let session_token_expiry_days = std::env::var("SESSION_TOKEN_EXPIRY_DAYS")
            .unwrap_or_else(|_| "7".to_string())
            .parse()
            .unwrap_or(7);

        Self {
            jwt_secret,
            session_token_expiry_days,
        }
    }
}
