//! Domain entities representing core business objects.

pub mod token;
pub mod user;
pub mod verification_code;

// Re-export commonly used types
pub use token::{
    Claims, IssuedToken,
    SESSION_TOKEN_EXPIRY_DAYS, JWT_ISSUER, JWT_AUDIENCE
};
pub use user::{User, UserRole};
pub use verification_code::{
    DeliveryMethod, VerificationCode,
    MAX_ATTEMPTS, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES, RESEND_COOLDOWN_SECONDS,
};
