//! Gateway trait for the recovery flow's server calls

use async_trait::async_trait;

use crate::domain::entities::verification_code::DeliveryMethod;

use super::types::GatewayResponse;

/// Server-side operations the recovery flow submits to
///
/// Implementations translate each call into the matching HTTP endpoint
/// and hand back the parsed response envelope. A rejected operation is
/// still `Ok`: the `Err` branch is reserved for transport failures where
/// no server verdict exists.
#[async_trait]
pub trait RecoveryGateway: Send + Sync {
    /// Reset a password by matching email and security answer
    async fn forgot_password(
        &self,
        email: &str,
        answer: &str,
        new_password: &str,
    ) -> Result<GatewayResponse, String>;

    /// Request a one-time code for the given target
    async fn send_verification(
        &self,
        method: DeliveryMethod,
        target: &str,
    ) -> Result<GatewayResponse, String>;

    /// Reset a password by proving possession of a delivered code
    async fn verify_reset(
        &self,
        method: DeliveryMethod,
        target: &str,
        code: &str,
        new_password: &str,
    ) -> Result<GatewayResponse, String>;
}
