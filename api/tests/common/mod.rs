//! Shared fixtures for the HTTP endpoint tests.
//!
//! Each test binary assembles the real application over in-memory
//! implementations of the repository, code store, and delivery ports,
//! so requests travel through routing, guards, validation, and the
//! domain services together. Only the MySQL and Redis edges are
//! replaced.

#![allow(dead_code)] // each test binary compiles this module separately

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};

use bv_api::app::AppState;
use bv_core::domain::entities::verification_code::{DeliveryMethod, MAX_ATTEMPTS};
use bv_core::repositories::MockUserRepository;
use bv_core::services::credential::{CredentialService, CredentialServiceConfig};
use bv_core::services::password::PasswordService;
use bv_core::services::token::{TokenService, TokenServiceConfig};
use bv_core::services::verification::{
    CodeDelivery, CodeStore, CodeVerification, VerificationService, VerificationServiceConfig,
};

/// Signing secret shared by every test app instance
pub const TEST_JWT_SECRET: &str = "bookverse-test-secret";

const CODE_TTL_SECONDS: i64 = 300;

/// Delivery port that records codes instead of sending them, so tests
/// can read back what the user would have received
pub struct MockCodeDelivery {
    sent: Mutex<HashMap<(DeliveryMethod, String), String>>,
}

impl MockCodeDelivery {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(HashMap::new()),
        }
    }

    /// The most recent code delivered to this target, if any
    pub fn last_code(&self, method: DeliveryMethod, target: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .get(&(method, target.to_string()))
            .cloned()
    }
}

#[async_trait]
impl CodeDelivery for MockCodeDelivery {
    async fn deliver(
        &self,
        method: DeliveryMethod,
        target: &str,
        code: &str,
    ) -> Result<String, String> {
        self.sent
            .lock()
            .unwrap()
            .insert((method, target.to_string()), code.to_string());
        Ok("test-message-id".to_string())
    }
}

struct StoredCode {
    code: Option<String>,
    expires_at: DateTime<Utc>,
    attempts: i64,
}

/// In-memory code store with the same expiry, attempt, and single-use
/// behavior as the Redis-backed store
pub struct MockCodeStore {
    codes: Mutex<HashMap<(DeliveryMethod, String), StoredCode>>,
}

impl MockCodeStore {
    pub fn new() -> Self {
        Self {
            codes: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl CodeStore for MockCodeStore {
    async fn store_code(
        &self,
        method: DeliveryMethod,
        target: &str,
        code: &str,
    ) -> Result<(), String> {
        self.codes.lock().unwrap().insert(
            (method, target.to_string()),
            StoredCode {
                code: Some(code.to_string()),
                expires_at: Utc::now() + Duration::seconds(CODE_TTL_SECONDS),
                attempts: 0,
            },
        );
        Ok(())
    }

    async fn verify_code(
        &self,
        method: DeliveryMethod,
        target: &str,
        code: &str,
    ) -> Result<CodeVerification, String> {
        let mut codes = self.codes.lock().unwrap();
        let key = (method, target.to_string());

        let outcome = match codes.get_mut(&key) {
            None => return Ok(CodeVerification::Expired),
            Some(entry) if Utc::now() > entry.expires_at => CodeVerification::Expired,
            Some(entry) => {
                entry.attempts += 1;
                if entry.attempts > MAX_ATTEMPTS as i64 {
                    CodeVerification::AttemptsExhausted
                } else if entry.code.as_deref() == Some(code) {
                    CodeVerification::Verified
                } else {
                    let remaining = (MAX_ATTEMPTS as i64 - entry.attempts).max(0);
                    if remaining == 0 {
                        entry.code = None;
                    }
                    CodeVerification::Mismatch {
                        remaining_attempts: remaining,
                    }
                }
            }
        };

        if !matches!(outcome, CodeVerification::Mismatch { .. }) {
            codes.remove(&key);
        }
        Ok(outcome)
    }

    async fn code_exists(&self, method: DeliveryMethod, target: &str) -> Result<bool, String> {
        let codes = self.codes.lock().unwrap();
        Ok(codes
            .get(&(method, target.to_string()))
            .map(|entry| entry.code.is_some() && Utc::now() <= entry.expires_at)
            .unwrap_or(false))
    }

    async fn get_code_ttl(
        &self,
        method: DeliveryMethod,
        target: &str,
    ) -> Result<Option<i64>, String> {
        let codes = self.codes.lock().unwrap();
        Ok(codes
            .get(&(method, target.to_string()))
            .map(|entry| (entry.expires_at - Utc::now()).num_seconds())
            .filter(|ttl| *ttl > 0))
    }

    async fn clear_code(&self, method: DeliveryMethod, target: &str) -> Result<(), String> {
        self.codes
            .lock()
            .unwrap()
            .remove(&(method, target.to_string()));
        Ok(())
    }
}

/// Application state wired over the in-memory fixtures, with handles to
/// the fixtures the tests inspect directly
pub struct TestContext {
    pub state: AppState<MockUserRepository, MockCodeDelivery, MockCodeStore>,
    pub users: Arc<MockUserRepository>,
    pub delivery: Arc<MockCodeDelivery>,
}

/// Build a fully wired test application state.
///
/// Bcrypt cost is lowered to keep the suite fast; everything else uses
/// the production defaults.
pub fn test_state() -> TestContext {
    let users = Arc::new(MockUserRepository::new());
    let code_store = Arc::new(MockCodeStore::new());
    let delivery = Arc::new(MockCodeDelivery::new());

    let password_service = Arc::new(PasswordService::with_cost(4));
    let token_service = Arc::new(TokenService::new(TokenServiceConfig::new(TEST_JWT_SECRET)));
    let verification_service = Arc::new(VerificationService::new(
        Arc::clone(&delivery),
        Arc::clone(&code_store),
        VerificationServiceConfig::default(),
    ));
    let credential_service = Arc::new(CredentialService::new(
        Arc::clone(&users),
        password_service,
        Arc::clone(&token_service),
        verification_service,
        CredentialServiceConfig::default(),
    ));

    TestContext {
        state: AppState {
            credential_service,
            token_service,
            user_repository: Arc::clone(&users),
        },
        users,
        delivery,
    }
}

/// Registration body for a default test reader
pub fn register_payload(email: &str) -> Value {
    json!({
        "name": "Jordan Reed",
        "email": email,
        "password": "turning-pages",
        "phone": "5551234567",
        "address": "12 Shelf Lane",
        "answer": "cycling"
    })
}
