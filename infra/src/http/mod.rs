//! HTTP client implementations
//!
//! This module provides the reqwest-backed gateway the recovery flow uses
//! to reach the credential endpoints from another process.

pub mod recovery_gateway;

pub use recovery_gateway::HttpRecoveryGateway;
