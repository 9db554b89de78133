//! Main token service implementation

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, IssuedToken, JWT_AUDIENCE, JWT_ISSUER};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Service for issuing and verifying stateless session tokens
///
/// Tokens are HS256-signed JWTs. No state is kept server side, so a
/// token stays valid until its expiry timestamp; nothing can revoke it
/// earlier. Verification fails closed: any tampering, a bad signature,
/// or a malformed payload yields an error, never a default identity.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `config` - Token service configuration with the signing secret
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[JWT_ISSUER]);
        validation.set_audience(&[JWT_AUDIENCE]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        // No clock leeway: a token one second past its expiry is rejected
        validation.leeway = 0;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issues a signed session token for a user
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's UUID, carried in the `sub` claim
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedToken)` - The signed token with its lifetime in seconds
    /// * `Err(DomainError)` - Token generation failed
    pub fn issue_session_token(&self, user_id: Uuid) -> Result<IssuedToken, DomainError> {
        let claims = Claims::with_expiry_days(user_id, self.config.session_token_expiry_days);
        let token = self.encode_jwt(&claims)?;

        Ok(IssuedToken::with_expiry_days(
            token,
            self.config.session_token_expiry_days,
        ))
    }

    /// Encodes claims into a JWT
    pub(crate) fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verifies a session token and returns the claims
    ///
    /// # Arguments
    ///
    /// * `token` - The JWT session token to verify
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if the signature and timestamps check out
    /// * `Err(TokenError)` - Token is expired, tampered with, or malformed
    pub fn verify_session_token(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    DomainError::Token(TokenError::TokenExpired)
                }
                jsonwebtoken::errors::ErrorKind::ImmatureSignature => {
                    DomainError::Token(TokenError::TokenNotYetValid)
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    DomainError::Token(TokenError::InvalidSignature)
                }
                _ => DomainError::Token(TokenError::InvalidTokenFormat),
            })?;

        Ok(token_data.claims)
    }
}
