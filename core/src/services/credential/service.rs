//! Main credential service implementation

use std::sync::Arc;

use uuid::Uuid;

use bv_shared::utils::{is_valid_email, is_valid_phone, mask_email, mask_phone, normalize_email};

use crate::domain::entities::user::User;
use crate::domain::entities::verification_code::DeliveryMethod;
use crate::domain::value_objects::LoginOutcome;
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::UserRepository;
use crate::services::password::PasswordService;
use crate::services::token::TokenService;
use crate::services::verification::{
    CodeDelivery, CodeStore, CodeVerification, SendCodeResult, VerificationService,
};

use super::config::CredentialServiceConfig;

/// Credential service for registration, login, and account recovery
///
/// Owns the full credential lifecycle: creating accounts, checking
/// passwords at login, issuing session tokens, and the three recovery
/// paths (security answer, emailed code context, and phone code).
pub struct CredentialService<R, D, C>
where
    R: UserRepository,
    D: CodeDelivery,
    C: CodeStore,
{
    /// User repository for credential persistence
    user_repository: Arc<R>,
    /// Password and answer hashing
    password_service: Arc<PasswordService>,
    /// Session token issuing
    token_service: Arc<TokenService>,
    /// Verification code workflow for code-based recovery
    verification_service: Arc<VerificationService<D, C>>,
    /// Service configuration
    config: CredentialServiceConfig,
}

impl<R, D, C> CredentialService<R, D, C>
where
    R: UserRepository,
    D: CodeDelivery,
    C: CodeStore,
{
    /// Create a new credential service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user persistence
    /// * `password_service` - Hashing service for passwords and answers
    /// * `token_service` - Session token issuer
    /// * `verification_service` - One-time code workflow
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<R>,
        password_service: Arc<PasswordService>,
        token_service: Arc<TokenService>,
        verification_service: Arc<VerificationService<D, C>>,
        config: CredentialServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            password_service,
            token_service,
            verification_service,
            config,
        }
    }

    /// Register a new account
    ///
    /// This method:
    /// 1. Requires every registration field
    /// 2. Normalizes and validates the email address
    /// 3. Enforces the password policy
    /// 4. Rejects emails that are already registered
    /// 5. Hashes the password and the security answer
    /// 6. Persists the new user
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError)` - Validation failed or the email is taken
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        phone: &str,
        address: &str,
        password: &str,
        answer: &str,
    ) -> DomainResult<User> {
        // Step 1: All registration fields are required
        require_field("name", name)?;
        require_field("email", email)?;
        require_field("phone", phone)?;
        require_field("address", address)?;
        require_field("password", password)?;
        require_field("answer", answer)?;

        // Step 2: Normalize and validate the email
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(DomainError::ValidationErr(ValidationError::InvalidEmail));
        }

        // Step 3: Enforce the password policy
        self.check_password_length(password)?;

        // Step 4: Reject duplicates before doing any hashing work
        if self.user_repository.exists_by_email(&email).await? {
            return Err(DomainError::Auth(AuthError::EmailExists));
        }

        // Step 5: Hash the password and the security answer
        let password_hash = self.password_service.hash(password).await?;
        let answer_hash = self.password_service.hash(answer).await?;

        // Step 6: Persist; the unique email index closes the race between
        // the existence check and the insert
        let user = User::new(
            name.to_string(),
            email.clone(),
            phone.to_string(),
            address.to_string(),
            password_hash,
            answer_hash,
        );
        let created = self.user_repository.create(user).await?;

        tracing::info!(
            email = %mask_email(&email),
            user_id = %created.id,
            event = "user_registered",
            "New account registered"
        );

        Ok(created)
    }

    /// Authenticate with email and password
    ///
    /// This method:
    /// 1. Requires both fields
    /// 2. Looks up the account by normalized email
    /// 3. Checks the password against the stored hash
    /// 4. Issues a session token
    ///
    /// # Returns
    ///
    /// * `Ok(LoginOutcome)` - The user and a fresh session token
    /// * `Err(DomainError)` - Unknown email or wrong password
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<LoginOutcome> {
        // Step 1: Both fields are required
        require_field("email", email)?;
        require_field("password", password)?;

        // Step 2: Look up the account
        let email = normalize_email(email);
        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(DomainError::Auth(AuthError::EmailNotRegistered))?;

        // Step 3: Check the password
        let password_ok = self
            .password_service
            .verify(password, &user.password_hash)
            .await?;
        if !password_ok {
            tracing::warn!(
                email = %mask_email(&email),
                event = "login_rejected",
                "Login rejected: password mismatch"
            );
            return Err(DomainError::Auth(AuthError::InvalidPassword));
        }

        // Step 4: Issue a session token
        let token = self.token_service.issue_session_token(user.id)?;

        tracing::info!(
            email = %mask_email(&email),
            user_id = %user.id,
            event = "login_succeeded",
            "User logged in"
        );

        Ok(LoginOutcome::new(user, token))
    }

    /// Update profile fields for an authenticated user
    ///
    /// Only the provided fields change; the email address is fixed for
    /// the lifetime of the account. A new password goes through the same
    /// policy check and hashing as at registration.
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The updated user
    /// * `Err(DomainError)` - Account missing or the new password is too short
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        name: Option<&str>,
        password: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> DomainResult<User> {
        // Step 1: The account must exist
        let mut user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;

        // Step 2: A replacement password must satisfy the policy
        if let Some(password) = password {
            self.check_password_length(password)?;
            let password_hash = self.password_service.hash(password).await?;
            user.set_password_hash(password_hash);
        }

        // Step 3: Apply the profile fields that were provided
        if let Some(name) = name {
            user.set_name(name.to_string());
        }
        if let Some(phone) = phone {
            user.set_phone(phone.to_string());
        }
        if let Some(address) = address {
            user.set_address(address.to_string());
        }

        // Step 4: Persist
        let updated = self.user_repository.update(user).await?;

        tracing::info!(
            user_id = %updated.id,
            event = "profile_updated",
            "Profile updated"
        );

        Ok(updated)
    }

    /// Reset a password by proving the security answer
    ///
    /// This method:
    /// 1. Requires email, answer, and the replacement password
    /// 2. Enforces the password policy before anything else is touched
    /// 3. Looks up the account by normalized email
    /// 4. Checks the answer against its stored hash
    /// 5. Replaces the stored password hash
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Password replaced
    /// * `Err(DomainError)` - Unknown email or wrong answer
    pub async fn reset_password_with_answer(
        &self,
        email: &str,
        answer: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        // Step 1: All three fields are required
        require_field("email", email)?;
        require_field("answer", answer)?;
        require_field("new_password", new_password)?;

        // Step 2: The replacement password must satisfy the policy
        self.check_password_length(new_password)?;

        // Step 3: The email must belong to an account
        let email = normalize_email(email);
        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(DomainError::Auth(AuthError::EmailNotRegistered))?;

        // Step 4: The answer must match its stored hash
        let answer_ok = self
            .password_service
            .verify(answer, &user.answer_hash)
            .await?;
        if !answer_ok {
            tracing::warn!(
                email = %mask_email(&email),
                event = "recovery_rejected",
                "Recovery rejected: security answer mismatch"
            );
            return Err(DomainError::Auth(AuthError::IdentityMismatch));
        }

        // Step 5: Replace the stored password hash
        let password_hash = self.password_service.hash(new_password).await?;
        self.user_repository
            .update_password(user.id, &password_hash)
            .await?;

        tracing::info!(
            email = %mask_email(&email),
            user_id = %user.id,
            event = "password_reset",
            "Password reset via security answer"
        );

        Ok(())
    }

    /// Send a recovery code to a registered email address or phone number
    ///
    /// This method:
    /// 1. Validates the target for the chosen channel
    /// 2. Confirms the target belongs to a registered account
    /// 3. Delegates to the verification service for the code workflow
    ///
    /// # Returns
    ///
    /// * `Ok(SendCodeResult)` - Code details and the next allowed resend time
    /// * `Err(DomainError)` - Unknown target, cooldown active, or delivery failed
    pub async fn send_recovery_code(
        &self,
        method: DeliveryMethod,
        target: &str,
    ) -> DomainResult<SendCodeResult> {
        // Step 1: Validate the target for the chosen channel
        require_field("target", target)?;
        let target = normalize_target(method, target)?;

        // Step 2: Only registered accounts can receive recovery codes
        self.find_recovery_account(method, &target).await?;

        // Step 3: Generate, store, and deliver the code
        self.verification_service.send_code(method, &target).await
    }

    /// Reset a password by proving possession of a delivered code
    ///
    /// The code is verified and consumed before the password changes, so
    /// the same code can never authorize two resets, even when the update
    /// itself fails.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Password replaced
    /// * `Err(DomainError)` - Unknown target, wrong or dead code, or the
    ///   replacement password fails the policy
    pub async fn reset_password_with_code(
        &self,
        method: DeliveryMethod,
        target: &str,
        code: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        // Step 1: Field and policy checks happen before the code is spent
        require_field("target", target)?;
        require_field("code", code)?;
        require_field("new_password", new_password)?;
        self.check_password_length(new_password)?;
        let target = normalize_target(method, target)?;

        // Step 2: Look up the account first so an unknown target costs no attempt
        let user = self.find_recovery_account(method, &target).await?;

        // Step 3: Verify and consume the code
        let outcome = self
            .verification_service
            .verify_code(method, &target, code)
            .await?;
        match outcome {
            CodeVerification::Verified => {}
            CodeVerification::Mismatch { .. } => {
                return Err(DomainError::Auth(AuthError::InvalidVerificationCode));
            }
            CodeVerification::Expired => {
                return Err(DomainError::Auth(AuthError::VerificationCodeExpired));
            }
            CodeVerification::AttemptsExhausted => {
                return Err(DomainError::Auth(AuthError::MaxAttemptsExceeded));
            }
        }

        // Step 4: Replace the password. The code is already consumed, so a
        // failure past this point cannot be replayed with the same code.
        let password_hash = self.password_service.hash(new_password).await?;
        self.user_repository
            .update_password(user.id, &password_hash)
            .await?;

        tracing::info!(
            target = %mask_recovery_target(method, &target),
            user_id = %user.id,
            event = "password_reset",
            "Password reset via verification code"
        );

        Ok(())
    }

    /// Look up the account a recovery target refers to
    async fn find_recovery_account(
        &self,
        method: DeliveryMethod,
        target: &str,
    ) -> DomainResult<User> {
        match method {
            DeliveryMethod::Email => self
                .user_repository
                .find_by_email(target)
                .await?
                .ok_or(DomainError::Auth(AuthError::EmailNotRegistered)),
            DeliveryMethod::Phone => self
                .user_repository
                .find_by_phone(target)
                .await?
                .ok_or(DomainError::Auth(AuthError::PhoneNotRegistered)),
        }
    }

    fn check_password_length(&self, password: &str) -> DomainResult<()> {
        if password.len() < self.config.min_password_length {
            return Err(DomainError::ValidationErr(
                ValidationError::PasswordTooShort {
                    min: self.config.min_password_length,
                },
            ));
        }
        Ok(())
    }
}

/// Reject empty or whitespace-only required fields
fn require_field(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::ValidationErr(ValidationError::RequiredField {
            field: field.to_string(),
        }));
    }
    Ok(())
}

/// Normalize and validate a recovery target for its channel
fn normalize_target(method: DeliveryMethod, target: &str) -> DomainResult<String> {
    match method {
        DeliveryMethod::Email => {
            let normalized = normalize_email(target);
            if !is_valid_email(&normalized) {
                return Err(DomainError::ValidationErr(ValidationError::InvalidEmail));
            }
            Ok(normalized)
        }
        DeliveryMethod::Phone => {
            let trimmed = target.trim().to_string();
            if !is_valid_phone(&trimmed) {
                return Err(DomainError::ValidationErr(ValidationError::InvalidFormat {
                    field: "phone".to_string(),
                }));
            }
            Ok(trimmed)
        }
    }
}

/// Mask a recovery target for log output
fn mask_recovery_target(method: DeliveryMethod, target: &str) -> String {
    match method {
        DeliveryMethod::Email => mask_email(target),
        DeliveryMethod::Phone => mask_phone(target),
    }
}
