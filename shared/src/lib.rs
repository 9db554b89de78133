//! Shared utilities and common types for BookVerse server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error types and response structures
//! - Utility functions (masking, validation)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, DatabaseConfig, Environment, ServerConfig,
    VerificationConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::{mask, validation};
