//! Configuration for the credential service

/// Configuration for the credential service
#[derive(Debug, Clone)]
pub struct CredentialServiceConfig {
    /// Minimum accepted password length
    ///
    /// The storefront accepts passwords as short as three characters.
    /// This is a documented weakness of the account rules, not an
    /// oversight; raising it would lock out existing accounts.
    pub min_password_length: usize,
}

impl Default for CredentialServiceConfig {
    fn default() -> Self {
        Self {
            min_password_length: 3,
        }
    }
}
