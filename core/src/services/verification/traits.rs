//! Traits for code delivery and code storage integration

use async_trait::async_trait;

use crate::domain::entities::verification_code::DeliveryMethod;

use super::types::CodeVerification;

/// Trait for delivering verification codes over a channel
#[async_trait]
pub trait CodeDelivery: Send + Sync {
    /// Deliver a verification code to the target address
    ///
    /// Returns the provider's message ID on success.
    async fn deliver(
        &self,
        method: DeliveryMethod,
        target: &str,
        code: &str,
    ) -> Result<String, String>;
}

/// Trait for verification code storage with TTL semantics
///
/// Codes are keyed by the (method, target) pair, so an email code and a
/// phone code for the same account never collide. The store owns the code
/// lifecycle: storing a code replaces any previous one and resets the
/// attempt counter, a successful verification consumes the code in the
/// same operation, and once the attempt budget is spent the code is
/// invalidated even if the correct digits arrive later.
#[async_trait]
pub trait CodeStore: Send + Sync {
    /// Store a code for the pair, replacing any previous one
    async fn store_code(
        &self,
        method: DeliveryMethod,
        target: &str,
        code: &str,
    ) -> Result<(), String>;

    /// Check a candidate code, counting the attempt
    async fn verify_code(
        &self,
        method: DeliveryMethod,
        target: &str,
        code: &str,
    ) -> Result<CodeVerification, String>;

    /// Check whether an unexpired code exists for the pair
    async fn code_exists(&self, method: DeliveryMethod, target: &str) -> Result<bool, String>;

    /// Get the remaining time-to-live in seconds, None when no code is stored
    async fn get_code_ttl(
        &self,
        method: DeliveryMethod,
        target: &str,
    ) -> Result<Option<i64>, String>;

    /// Drop the stored code and attempt counter for the pair
    async fn clear_code(&self, method: DeliveryMethod, target: &str) -> Result<(), String>;
}
