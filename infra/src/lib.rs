//! # Infrastructure Layer
//!
//! Concrete adapters behind the core's seams: MySQL persistence for user
//! credentials, a Redis-backed verification code store, console code
//! delivery for development, and an HTTP client for driving the recovery
//! endpoints from another process.
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//! - `redis-cache`: Enable the Redis code store (default)

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Cache module - Redis client and the verification code store
#[cfg(feature = "redis-cache")]
pub mod cache;

/// Delivery module - verification code delivery channels
pub mod delivery;

/// HTTP module - client for the recovery endpoints
pub mod http;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP client error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
