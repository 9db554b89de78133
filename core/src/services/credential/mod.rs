//! Credential service module
//!
//! This module provides the account credential workflow:
//! - Registration with duplicate email rejection
//! - Email and password login with session token issue
//! - Profile updates for authenticated users
//! - Password recovery via security answer or delivered code

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::CredentialServiceConfig;
pub use service::CredentialService;
