//! Verification code service module
//!
//! This module provides the one-time code workflow used by account
//! recovery:
//! - Uniform 6-digit code generation for email and phone channels
//! - Single-use codes consumed on successful verification
//! - Attempt tracking with a hard per-code budget
//! - Resend cooldown enforcement

mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationServiceConfig;
pub use service::VerificationService;
pub use traits::{CodeDelivery, CodeStore};
pub use types::{CodeVerification, SendCodeResult};
