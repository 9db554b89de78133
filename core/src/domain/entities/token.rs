//! Session token entities for JWT-based authentication.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session token expiration time (7 days)
pub const SESSION_TOKEN_EXPIRY_DAYS: i64 = 7;

/// JWT issuer
pub const JWT_ISSUER: &str = "bookverse";

/// JWT audience
pub const JWT_AUDIENCE: &str = "bookverse-api";

/// Claims structure for the session token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,
}

impl Claims {
    /// Creates new claims for a session token with the default lifetime
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's UUID
    ///
    /// # Returns
    ///
    /// A new `Claims` instance expiring `SESSION_TOKEN_EXPIRY_DAYS` from now
    pub fn new_session_token(user_id: Uuid) -> Self {
        Self::with_expiry_days(user_id, SESSION_TOKEN_EXPIRY_DAYS)
    }

    /// Creates new claims for a session token with an explicit lifetime
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's UUID
    /// * `expiry_days` - Token lifetime in days
    pub fn with_expiry_days(user_id: Uuid, expiry_days: i64) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::days(expiry_days);

        Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.exp
    }

    /// Checks if the claims are valid (not expired and after nbf)
    pub fn is_valid(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.nbf && now < self.exp
    }

    /// Gets the user ID from the claims
    ///
    /// # Returns
    ///
    /// `Ok(Uuid)` if the subject can be parsed as a UUID, `Err` otherwise
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// A signed session token returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    /// Encoded JWT session token
    pub token: String,

    /// Token lifetime in seconds
    pub expires_in: i64,
}

impl IssuedToken {
    /// Creates a new issued token with the default session lifetime
    pub fn new(token: String) -> Self {
        Self {
            token,
            expires_in: SESSION_TOKEN_EXPIRY_DAYS * 24 * 60 * 60,
        }
    }

    /// Creates a new issued token with an explicit lifetime in days
    pub fn with_expiry_days(token: String, expiry_days: i64) -> Self {
        Self {
            token,
            expires_in: expiry_days * 24 * 60 * 60,
        }
    }
}
