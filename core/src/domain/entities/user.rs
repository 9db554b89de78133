//! User identity entity for the credential store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Privilege level attached to a user identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular storefront customer
    Ordinary,
    /// Back-office administrator
    Administrative,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Ordinary => "ordinary",
            UserRole::Administrative => "administrative",
        }
    }

    /// Map the persisted admin flag onto a role
    pub fn from_is_admin(is_admin: bool) -> Self {
        if is_admin {
            UserRole::Administrative
        } else {
            UserRole::Ordinary
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Administrative)
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Ordinary
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A registered user identity
///
/// `email` is the unique, case-insensitive match key and is stored
/// normalized (trimmed, lowercase). The password and recovery answer are
/// held only as salted hashes and are never handed back to callers outside
/// the hasher comparison path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Normalized email address, unique per identity
    pub email: String,

    /// Contact phone number
    pub phone: String,

    /// Postal address
    pub address: String,

    /// Salted bcrypt hash of the login password
    pub password_hash: String,

    /// Salted bcrypt hash of the security-question answer
    pub answer_hash: String,

    /// Privilege level
    pub role: UserRole,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new ordinary user
    pub fn new(
        name: String,
        email: String,
        phone: String,
        address: String,
        password_hash: String,
        answer_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            phone,
            address,
            password_hash,
            answer_hash,
            role: UserRole::Ordinary,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether this identity carries administrative privilege
    pub fn is_administrative(&self) -> bool {
        self.role.is_admin()
    }

    /// Update the display name
    pub fn set_name(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }

    /// Update the contact phone number
    pub fn set_phone(&mut self, phone: String) {
        self.phone = phone;
        self.updated_at = Utc::now();
    }

    /// Update the postal address
    pub fn set_address(&mut self, address: String) {
        self.address = address;
        self.updated_at = Utc::now();
    }

    /// Replace the stored password hash
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Grant or revoke administrative privilege
    pub fn set_role(&mut self, role: UserRole) {
        self.role = role;
        self.updated_at = Utc::now();
    }
}
