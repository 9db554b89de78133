//! Token service test modules
