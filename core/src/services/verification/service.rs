//! Main verification service implementation

use std::sync::Arc;

use chrono::Utc;

use bv_shared::utils::{mask_email, mask_phone};

use crate::domain::entities::verification_code::{DeliveryMethod, VerificationCode, CODE_LENGTH};
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};

use super::config::VerificationServiceConfig;
use super::traits::{CodeDelivery, CodeStore};
use super::types::{CodeVerification, SendCodeResult};

/// Verification service for issuing and checking one-time codes
///
/// Codes behave the same on every channel: 6 digits, one store slot per
/// (method, target) pair, consumed on first successful verification.
pub struct VerificationService<D: CodeDelivery, C: CodeStore> {
    /// Delivery channel for sending codes
    delivery: Arc<D>,
    /// Store holding live codes and attempt counters
    code_store: Arc<C>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<D: CodeDelivery, C: CodeStore> VerificationService<D, C> {
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `delivery` - Delivery channel implementation
    /// * `code_store` - Code store implementation
    /// * `config` - Service configuration
    pub fn new(delivery: Arc<D>, code_store: Arc<C>, config: VerificationServiceConfig) -> Self {
        Self {
            delivery,
            code_store,
            config,
        }
    }

    /// Generate, store, and deliver a verification code
    ///
    /// This method:
    /// 1. Enforces the resend cooldown while a recent code is live
    /// 2. Invalidates any previous code for the target
    /// 3. Generates a fresh 6-digit code
    /// 4. Stores the code before anything leaves the process
    /// 5. Delivers the code over the requested channel
    ///
    /// # Arguments
    ///
    /// * `method` - The delivery channel
    /// * `target` - The email address or phone number to send to
    ///
    /// # Returns
    ///
    /// * `Ok(SendCodeResult)` - The created code, message ID, and next resend time
    /// * `Err(DomainError)` - Cooldown still active, storage failed, or delivery failed
    pub async fn send_code(
        &self,
        method: DeliveryMethod,
        target: &str,
    ) -> DomainResult<SendCodeResult> {
        // Step 1: Check the resend cooldown against the live code's TTL
        if let Ok(true) = self.code_store.code_exists(method, target).await {
            if let Ok(Some(ttl)) = self.code_store.get_code_ttl(method, target).await {
                let cooldown_remaining = ttl
                    - (self.config.code_expiration_minutes * 60
                        - self.config.resend_cooldown_seconds);
                if cooldown_remaining > 0 {
                    tracing::warn!(
                        target = %mask_target(method, target),
                        method = %method,
                        cooldown_remaining = cooldown_remaining,
                        event = "resend_cooldown_active",
                        "Verification code requested again before the cooldown elapsed"
                    );
                    return Err(DomainError::Auth(AuthError::ResendCooldown {
                        seconds: cooldown_remaining,
                    }));
                }
            }
        }

        // Step 2: Invalidate previous codes so only the newest one is live
        self.code_store
            .clear_code(method, target)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to clear previous verification code: {}", e),
            })?;

        // Step 3: Generate a fresh code
        let verification_code = VerificationCode::new_with_expiration(
            target.to_string(),
            method,
            self.config.code_expiration_minutes,
        );

        tracing::info!(
            target = %mask_target(method, target),
            method = %method,
            session_id = %verification_code.id,
            event = "code_generated",
            "Generated new verification code"
        );

        // Step 4: Store the code
        self.code_store
            .store_code(method, target, &verification_code.code)
            .await
            .map_err(|e| {
                tracing::error!(
                    target = %mask_target(method, target),
                    error = %e,
                    event = "code_storage_failed",
                    "Failed to store verification code"
                );
                DomainError::Internal {
                    message: format!("Failed to store verification code: {}", e),
                }
            })?;

        // Step 5: Deliver the code
        let message_id = self
            .delivery
            .deliver(method, target, &verification_code.code)
            .await
            .map_err(|e| {
                tracing::error!(
                    target = %mask_target(method, target),
                    error = %e,
                    event = "code_delivery_failed",
                    "Failed to deliver verification code"
                );
                DomainError::Internal {
                    message: format!("Failed to deliver verification code: {}", e),
                }
            })?;

        let next_resend_at =
            Utc::now() + chrono::Duration::seconds(self.config.resend_cooldown_seconds);

        Ok(SendCodeResult {
            verification_code,
            message_id,
            next_resend_at,
        })
    }

    /// Check a submitted code for a target
    ///
    /// Malformed input (wrong length or non-digits) is rejected before the
    /// store is touched, so it never costs an attempt. Everything else is
    /// decided by the store: a match consumes the code, a mismatch burns an
    /// attempt, and a spent attempt budget invalidates the code.
    ///
    /// # Arguments
    ///
    /// * `method` - The delivery channel the code was sent over
    /// * `target` - The email address or phone number the code was sent to
    /// * `code` - The submitted 6-digit code
    ///
    /// # Returns
    ///
    /// * `Ok(CodeVerification)` - The verification outcome
    /// * `Err(DomainError)` - Malformed input or a store error
    pub async fn verify_code(
        &self,
        method: DeliveryMethod,
        target: &str,
        code: &str,
    ) -> DomainResult<CodeVerification> {
        if code.len() != CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
            tracing::warn!(
                target = %mask_target(method, target),
                code_length = code.len(),
                event = "invalid_code_format",
                "Verification code with invalid format submitted"
            );
            return Err(DomainError::ValidationErr(ValidationError::InvalidFormat {
                field: "code".to_string(),
            }));
        }

        let outcome = self
            .code_store
            .verify_code(method, target, code)
            .await
            .map_err(|e| {
                tracing::error!(
                    target = %mask_target(method, target),
                    error = %e,
                    event = "code_verification_error",
                    "Store error while verifying code"
                );
                DomainError::Internal {
                    message: format!("Failed to verify code: {}", e),
                }
            })?;

        match &outcome {
            CodeVerification::Verified => {
                tracing::info!(
                    target = %mask_target(method, target),
                    event = "code_verified",
                    "Verification code accepted and consumed"
                );
            }
            CodeVerification::Mismatch { remaining_attempts } => {
                tracing::warn!(
                    target = %mask_target(method, target),
                    remaining_attempts = *remaining_attempts,
                    event = "code_mismatch",
                    "Verification code did not match"
                );
            }
            CodeVerification::Expired => {
                tracing::warn!(
                    target = %mask_target(method, target),
                    event = "code_expired",
                    "No live verification code for target"
                );
            }
            CodeVerification::AttemptsExhausted => {
                tracing::warn!(
                    target = %mask_target(method, target),
                    event = "code_attempts_exhausted",
                    "Verification attempt budget spent"
                );
            }
        }

        Ok(outcome)
    }
}

/// Mask a target address for log output
fn mask_target(method: DeliveryMethod, target: &str) -> String {
    match method {
        DeliveryMethod::Email => mask_email(target),
        DeliveryMethod::Phone => mask_phone(target),
    }
}
