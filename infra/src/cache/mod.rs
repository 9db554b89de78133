//! Cache module for Redis-based caching
//!
//! This module provides Redis caching functionality for the BookVerse server,
//! including connection management, retry logic, and the verification code
//! store backing the recovery flows.

pub mod code_store;
pub mod redis_client;

pub use code_store::RedisCodeStore;
pub use redis_client::RedisClient;

// Re-export commonly used types
pub use bv_shared::config::cache::CacheConfig;
