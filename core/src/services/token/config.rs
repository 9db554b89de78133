//! Configuration for the token service

use crate::domain::entities::token::SESSION_TOKEN_EXPIRY_DAYS;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// Session token expiry in days
    pub session_token_expiry_days: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            session_token_expiry_days: SESSION_TOKEN_EXPIRY_DAYS,
        }
    }
}

impl TokenServiceConfig {
    /// Create a configuration with an explicit signing secret
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            ..Default::default()
        }
    }
}
