//! Credential service test modules
