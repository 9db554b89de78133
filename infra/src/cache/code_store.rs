//! Redis-backed verification code store
//!
//! This module implements the core `CodeStore` trait on top of Redis with:
//! - Configurable expiration for verification codes (5 minutes by default)
//! - Attempt tracking with a configurable cap per code
//! - Hashed code storage and constant-time comparison
//!
//! Codes are keyed by the (method, target) pair so an email code and a phone
//! code for the same account never collide. Key patterns:
//! - `verification:code:{method}:{target}` - Stores the hashed code
//! - `verification:attempts:{method}:{target}` - Tracks verification attempts
//!
//! When the attempt budget is spent the code key is dropped but the counter
//! survives until its own expiry, so a follow-up attempt reports exhaustion
//! rather than expiry.

use async_trait::async_trait;
use constant_time_eq::constant_time_eq;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use bv_core::domain::entities::verification_code::DeliveryMethod;
use bv_core::services::verification::{CodeStore, CodeVerification};
use bv_shared::config::VerificationConfig;
use bv_shared::utils::{mask_email, mask_phone};

use crate::cache::RedisClient;

/// Redis implementation of the verification code store
///
/// Stores SHA-256 digests rather than raw codes, and consumes the code in
/// the same operation that verifies it.
#[derive(Clone)]
pub struct RedisCodeStore {
    /// Redis client for cache operations
    redis_client: RedisClient,
    /// Code time-to-live in seconds
    code_expiry_seconds: u64,
    /// Failed attempts allowed before the code is invalidated
    max_attempts: i64,
}

impl RedisCodeStore {
    /// Create a new Redis code store
    ///
    /// # Arguments
    /// * `redis_client` - Redis client for cache operations
    /// * `config` - Verification lifecycle settings
    pub fn new(redis_client: RedisClient, config: &VerificationConfig) -> Self {
        Self {
            redis_client,
            code_expiry_seconds: (config.code_expiration_minutes * 60).max(0) as u64,
            max_attempts: i64::from(config.max_attempts),
        }
    }

    /// Format Redis key for verification code storage
    fn format_code_key(method: DeliveryMethod, target: &str) -> String {
        format!("verification:code:{}:{}", method.as_str(), target)
    }

    /// Format Redis key for attempt tracking
    fn format_attempts_key(method: DeliveryMethod, target: &str) -> String {
        format!("verification:attempts:{}:{}", method.as_str(), target)
    }

    /// Hash a verification code using SHA-256
    ///
    /// Codes are stored as digests so a cache dump never exposes them.
    fn hash_code(code: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(code.as_bytes());
        let result = hasher.finalize();
        format!("{:x}", result)
    }

    /// Mask the delivery target for logging
    fn mask_target(method: DeliveryMethod, target: &str) -> String {
        match method {
            DeliveryMethod::Email => mask_email(target),
            DeliveryMethod::Phone => mask_phone(target),
        }
    }

    /// Best-effort removal of both keys for the pair
    async fn clear_pair(&self, code_key: &str, attempts_key: &str) {
        let _ = self.redis_client.delete(code_key).await;
        let _ = self.redis_client.delete(attempts_key).await;
    }
}

#[async_trait]
impl CodeStore for RedisCodeStore {
    async fn store_code(
        &self,
        method: DeliveryMethod,
        target: &str,
        code: &str,
    ) -> Result<(), String> {
        let code_key = Self::format_code_key(method, target);
        let attempts_key = Self::format_attempts_key(method, target);

        // Hash the code for secure storage
        let hashed_code = Self::hash_code(code);

        debug!(
            "Storing verification code for {}: {}",
            method.as_str(),
            Self::mask_target(method, target)
        );

        // Store the hashed code with expiration
        self.redis_client
            .set_with_expiry(&code_key, &hashed_code, self.code_expiry_seconds)
            .await
            .map_err(|e| e.to_string())?;

        // Reset attempt counter (created again on the first verification attempt)
        let _ = self.redis_client.delete(&attempts_key).await;

        info!(
            "Verification code stored for {}: {}",
            method.as_str(),
            Self::mask_target(method, target)
        );

        Ok(())
    }

    async fn verify_code(
        &self,
        method: DeliveryMethod,
        target: &str,
        code: &str,
    ) -> Result<CodeVerification, String> {
        let code_key = Self::format_code_key(method, target);
        let attempts_key = Self::format_attempts_key(method, target);

        debug!(
            "Verifying code for {}: {}",
            method.as_str(),
            Self::mask_target(method, target)
        );

        // A missing code key means the code expired, was consumed, or the
        // attempt budget already invalidated it. The surviving counter
        // distinguishes the last case.
        let stored_hash = match self
            .redis_client
            .get(&code_key)
            .await
            .map_err(|e| e.to_string())?
        {
            Some(hash) => hash,
            None => {
                let spent = self
                    .redis_client
                    .get(&attempts_key)
                    .await
                    .map_err(|e| e.to_string())?
                    .and_then(|count| count.parse::<i64>().ok())
                    .unwrap_or(0);

                if spent >= self.max_attempts {
                    let _ = self.redis_client.delete(&attempts_key).await;
                    return Ok(CodeVerification::AttemptsExhausted);
                }
                return Ok(CodeVerification::Expired);
            }
        };

        // Count this attempt; the counter picks up the code's TTL window
        let attempts = self
            .redis_client
            .increment(&attempts_key, Some(self.code_expiry_seconds))
            .await
            .map_err(|e| e.to_string())?;

        if attempts > self.max_attempts {
            warn!(
                "Maximum verification attempts ({}) exceeded for {}: {}",
                self.max_attempts,
                method.as_str(),
                Self::mask_target(method, target)
            );
            self.clear_pair(&code_key, &attempts_key).await;
            return Ok(CodeVerification::AttemptsExhausted);
        }

        let candidate_hash = Self::hash_code(code);
        if constant_time_eq(candidate_hash.as_bytes(), stored_hash.as_bytes()) {
            info!(
                "Verification code validated for {}: {}",
                method.as_str(),
                Self::mask_target(method, target)
            );
            // A verified code is single use
            self.clear_pair(&code_key, &attempts_key).await;
            return Ok(CodeVerification::Verified);
        }

        let remaining = (self.max_attempts - attempts).max(0);
        warn!(
            "Invalid verification code for {}: {} (attempt {}/{})",
            method.as_str(),
            Self::mask_target(method, target),
            attempts,
            self.max_attempts
        );

        if remaining == 0 {
            // The budget is spent. Drop the code but keep the counter so the
            // next attempt reports exhaustion instead of expiry.
            let _ = self.redis_client.delete(&code_key).await;
        }

        Ok(CodeVerification::Mismatch {
            remaining_attempts: remaining,
        })
    }

    async fn code_exists(&self, method: DeliveryMethod, target: &str) -> Result<bool, String> {
        let code_key = Self::format_code_key(method, target);
        self.redis_client
            .exists(&code_key)
            .await
            .map_err(|e| e.to_string())
    }

    async fn get_code_ttl(
        &self,
        method: DeliveryMethod,
        target: &str,
    ) -> Result<Option<i64>, String> {
        let code_key = Self::format_code_key(method, target);
        self.redis_client
            .ttl(&code_key)
            .await
            .map_err(|e| e.to_string())
    }

    async fn clear_code(&self, method: DeliveryMethod, target: &str) -> Result<(), String> {
        let code_key = Self::format_code_key(method, target);
        let attempts_key = Self::format_attempts_key(method, target);

        debug!(
            "Clearing verification data for {}: {}",
            method.as_str(),
            Self::mask_target(method, target)
        );

        self.clear_pair(&code_key, &attempts_key).await;
        Ok(())
    }
}
