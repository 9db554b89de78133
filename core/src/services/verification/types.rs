//! Types for verification service results

use chrono::{DateTime, Utc};

use crate::domain::entities::verification_code::VerificationCode;

/// Result of sending a verification code
#[derive(Debug, Clone)]
pub struct SendCodeResult {
    /// The verification code entity that was created
    pub verification_code: VerificationCode,
    /// Message ID reported by the delivery channel
    pub message_id: String,
    /// When the user can request another code
    pub next_resend_at: DateTime<Utc>,
}

/// Outcome of checking a candidate code against the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeVerification {
    /// The code matched and has been consumed
    Verified,
    /// The code did not match; the attempt has been counted
    Mismatch {
        /// Attempts left before the code is invalidated
        remaining_attempts: i64,
    },
    /// No live code exists for the target (expired, consumed, or never sent)
    Expired,
    /// The attempt budget is spent and the code has been invalidated
    AttemptsExhausted,
}
