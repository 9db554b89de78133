//! Verification code entity for out-of-band identity proof.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of verification attempts allowed
pub const MAX_ATTEMPTS: i32 = 3;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for verification codes (5 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 5;

/// Cooldown before a new code may be requested for the same target (60 seconds)
pub const RESEND_COOLDOWN_SECONDS: i64 = 60;

/// Channel a verification code is delivered over
///
/// Together with the target address it forms the storage key for a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    /// Delivered to an email address
    Email,
    /// Delivered to a phone number via SMS
    Phone,
}

impl DeliveryMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMethod::Email => "email",
            DeliveryMethod::Phone => "phone",
        }
    }
}

impl std::fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DeliveryMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "email" => Ok(DeliveryMethod::Email),
            "phone" | "sms" => Ok(DeliveryMethod::Phone),
            _ => Err(format!("Invalid delivery method: {}", s)),
        }
    }
}

/// Single-use, time-bounded verification code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// Unique identifier for the verification code
    pub id: Uuid,

    /// Address the code was sent to (email address or phone number)
    pub target: String,

    /// Channel the code was delivered over
    pub method: DeliveryMethod,

    /// The 6-digit verification code
    pub code: String,

    /// Number of verification attempts made
    pub attempts: i32,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,

    /// Whether the code has been successfully used
    pub is_used: bool,
}

impl VerificationCode {
    /// Creates a new verification code with the default expiration
    pub fn new(target: String, method: DeliveryMethod) -> Self {
        Self::new_with_expiration(target, method, DEFAULT_EXPIRATION_MINUTES)
    }

    /// Creates a new verification code with a custom expiration time
    ///
    /// # Arguments
    ///
    /// * `target` - The address to send the code to
    /// * `method` - The delivery channel
    /// * `expiration_minutes` - Number of minutes until the code expires
    pub fn new_with_expiration(
        target: String,
        method: DeliveryMethod,
        expiration_minutes: i64,
    ) -> Self {
        let code = Self::generate_code();
        let now = Utc::now();
        let expires_at = now + Duration::minutes(expiration_minutes);

        Self {
            id: Uuid::new_v4(),
            target,
            method,
            code,
            attempts: 0,
            created_at: now,
            expires_at,
            is_used: false,
        }
    }

    /// Generates a uniformly random 6-digit code
    fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        let code: u32 = rng.gen_range(100_000..=999_999);
        code.to_string()
    }

    /// Checks if the verification code has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Checks if the verification code is still usable
    ///
    /// A code is usable if it hasn't expired, hasn't been consumed, and the
    /// attempt cap hasn't been reached.
    pub fn is_valid(&self) -> bool {
        !self.is_expired() && !self.is_used && self.attempts < MAX_ATTEMPTS
    }

    /// Constant-time comparison against a submitted code
    pub fn matches(&self, input_code: &str) -> bool {
        self.code.len() == input_code.len()
            && constant_time_eq(self.code.as_bytes(), input_code.as_bytes())
    }

    /// Verifies a submitted code against this one
    ///
    /// Increments the attempt counter on a mismatch and marks the code as
    /// used on a match, so a code can never be accepted twice.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the code matches and is valid, `Err` with a reason otherwise
    pub fn verify(&mut self, input_code: &str) -> Result<(), String> {
        if self.is_expired() {
            return Err("Verification code has expired".to_string());
        }

        if self.is_used {
            return Err("Verification code has already been used".to_string());
        }

        if self.attempts >= MAX_ATTEMPTS {
            return Err("Maximum verification attempts exceeded".to_string());
        }

        self.attempts += 1;

        if self.matches(input_code) {
            self.is_used = true;
            Ok(())
        } else {
            let remaining = MAX_ATTEMPTS - self.attempts;
            if remaining > 0 {
                Err(format!(
                    "Invalid verification code. {} attempt(s) remaining",
                    remaining
                ))
            } else {
                Err("Invalid verification code. No attempts remaining".to_string())
            }
        }
    }

    /// Gets the number of remaining verification attempts
    pub fn remaining_attempts(&self) -> i32 {
        (MAX_ATTEMPTS - self.attempts).max(0)
    }

    /// Marks the verification code as used
    pub fn mark_as_used(&mut self) {
        self.is_used = true;
    }
}
