//! Token service module for JWT management
//!
//! This module handles session token operations:
//! - Signing session tokens with the configured secret
//! - Verifying presented tokens and decoding their claims
//!
//! Tokens are stateless; there is no server-side token storage.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::TokenService;
