//! Password and security answer hashing built on bcrypt

use bcrypt::DEFAULT_COST;

use crate::errors::{DomainError, DomainResult};

/// Service for hashing and checking passwords and security answers
///
/// Every hash carries its own random salt, so two users with the same
/// password never share a stored hash. Hashing runs on the blocking
/// thread pool because bcrypt is intentionally slow.
pub struct PasswordService {
    cost: u32,
}

impl PasswordService {
    /// Create a service with the production bcrypt cost factor
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    /// Create a service with an explicit cost factor
    ///
    /// Tests use the minimum cost (4) to keep hashing fast.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext secret with a fresh random salt
    ///
    /// # Returns
    /// * `Ok(String)` - The bcrypt hash, salt embedded
    /// * `Err(DomainError)` - Hashing failed
    pub async fn hash(&self, plain: &str) -> DomainResult<String> {
        let cost = self.cost;
        let plain = plain.to_string();

        tokio::task::spawn_blocking(move || bcrypt::hash(plain, cost))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Hashing task failed: {}", e),
            })?
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to hash secret: {}", e),
            })
    }

    /// Check a plaintext secret against a stored hash
    ///
    /// Re-hashes the candidate with the salt embedded in the stored hash;
    /// the comparison inside `bcrypt::verify` is constant time.
    ///
    /// # Returns
    /// * `Ok(true)` - The secret matches
    /// * `Ok(false)` - The secret does not match
    /// * `Err(DomainError)` - The stored hash is malformed
    pub async fn verify(&self, plain: &str, hashed: &str) -> DomainResult<bool> {
        let plain = plain.to_string();
        let hashed = hashed.to_string();

        tokio::task::spawn_blocking(move || bcrypt::verify(plain, &hashed))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Hashing task failed: {}", e),
            })?
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to verify secret: {}", e),
            })
    }
}

impl Default for PasswordService {
    fn default() -> Self {
        Self::new()
    }
}
