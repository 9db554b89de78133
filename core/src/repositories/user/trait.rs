//! User repository trait defining the interface for credential persistence.
//!
//! This module defines the repository pattern interface for User entities.
//! The trait is async-first and uses Result types for proper error handling.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Implementations handle the actual database operations while maintaining
/// the abstraction boundary between domain and infrastructure layers. Email
/// lookups expect the normalized (trimmed, lowercase) form; `create` must be
/// an atomic check-and-insert so concurrent registrations with the same
/// email cannot both succeed.
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use uuid::Uuid;
/// use bv_core::repositories::UserRepository;
/// use bv_core::domain::entities::user::User;
/// use bv_core::errors::DomainError;
///
/// struct MySqlUserRepository {
///     // database connection pool
/// }
///
/// #[async_trait]
/// impl UserRepository for MySqlUserRepository {
///     async fn create(&self, user: User) -> Result<User, DomainError> {
///         // INSERT guarded by the unique email index
///         Ok(user)
///     }
///
///     async fn find_by_email(&self, _email: &str) -> Result<Option<User>, DomainError> {
///         Ok(None)
///     }
///
///     async fn find_by_phone(&self, _phone: &str) -> Result<Option<User>, DomainError> {
///         Ok(None)
///     }
///
///     async fn find_by_id(&self, _id: Uuid) -> Result<Option<User>, DomainError> {
///         Ok(None)
///     }
///
///     async fn update(&self, user: User) -> Result<User, DomainError> {
///         Ok(user)
///     }
///
///     async fn update_password(&self, _id: Uuid, _new_hash: &str) -> Result<(), DomainError> {
///         Ok(())
///     }
///
///     async fn exists_by_email(&self, _email: &str) -> Result<bool, DomainError> {
///         Ok(false)
///     }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user in the repository
    ///
    /// The insert and the email uniqueness check are a single atomic
    /// operation; a duplicate email fails with `AuthError::EmailExists`.
    ///
    /// # Arguments
    /// * `user` - The User entity to persist
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError)` - Duplicate email or database error
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Find a user by their normalized email address
    ///
    /// # Arguments
    /// * `email` - Normalized (trimmed, lowercase) email address
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user registered under this email
    /// * `Err(DomainError)` - Database error occurred
    ///
    /// # Example
    /// ```no_run
    /// # use bv_core::repositories::UserRepository;
    /// # async fn example(repo: &impl UserRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// match repo.find_by_email("reader@bookverse.io").await? {
    ///     Some(user) => println!("User found: {:?}", user.id),
    ///     None => println!("User not found"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their phone number
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user registered under this phone number
    /// * `Err(DomainError)` - Database error occurred
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user found with given ID
    /// * `Err(DomainError)` - Database error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Update an existing user in the repository
    ///
    /// Persists the full entity; callers mutate the entity first and hand
    /// it over, which keeps partial profile updates in the domain layer.
    ///
    /// # Returns
    /// * `Ok(User)` - The updated user
    /// * `Err(DomainError)` - User not found or database error
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Replace only the stored password hash for a user
    ///
    /// # Arguments
    /// * `id` - The UUID of the user
    /// * `new_hash` - The replacement bcrypt hash
    ///
    /// # Returns
    /// * `Ok(())` - Password hash replaced
    /// * `Err(DomainError)` - User not found or database error
    async fn update_password(&self, id: Uuid, new_hash: &str) -> Result<(), DomainError>;

    /// Check if a user exists with the given normalized email
    ///
    /// # Returns
    /// * `Ok(true)` - User exists
    /// * `Ok(false)` - User does not exist
    /// * `Err(DomainError)` - Database error occurred
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;
}
