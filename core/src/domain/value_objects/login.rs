//! Login outcome value object.

use crate::domain::entities::token::IssuedToken;
use crate::domain::entities::user::User;

/// Result of a successful login: the authenticated identity and a freshly
/// signed session token
///
/// The transport layer is responsible for sanitizing the user record before
/// it leaves the process; the stored hashes ride along here only so the
/// caller can shape its own response.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    /// The authenticated user
    pub user: User,

    /// Session token proving the login
    pub token: IssuedToken,
}

impl LoginOutcome {
    /// Creates a new login outcome
    pub fn new(user: User, token: IssuedToken) -> Self {
        Self { user, token }
    }
}
