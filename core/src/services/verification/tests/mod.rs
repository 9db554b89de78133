//! Verification service test modules

pub mod mocks;
