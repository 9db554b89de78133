//! Mock implementations for testing verification service

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::entities::verification_code::{DeliveryMethod, MAX_ATTEMPTS};
use crate::services::verification::traits::{CodeDelivery, CodeStore};
use crate::services::verification::types::CodeVerification;

/// Mock TTL applied to stored codes (5 minutes)
const MOCK_CODE_TTL_SECONDS: i64 = 300;

// Mock delivery channel for testing
pub struct MockCodeDelivery {
    pub sent: Arc<Mutex<HashMap<(DeliveryMethod, String), String>>>,
    pub should_fail: bool,
}

impl MockCodeDelivery {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent: Arc::new(Mutex::new(HashMap::new())),
            should_fail,
        }
    }

    pub fn get_sent_code(&self, method: DeliveryMethod, target: &str) -> Option<String> {
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
        if self.should_fail {
            return Err("Delivery channel error".to_string());
        }
        self.sent
            .lock()
            .unwrap()
            .insert((method, target.to_string()), code.to_string());
        Ok(format!("mock-msg-{}", uuid::Uuid::new_v4()))
    }
}

struct StoredCode {
    // None once the attempt budget invalidated the code
    code: Option<String>,
    expires_at: DateTime<Utc>,
    attempts: i64,
}

// Mock code store for testing, mirroring the production store's lifecycle
pub struct MockCodeStore {
    codes: Arc<Mutex<HashMap<(DeliveryMethod, String), StoredCode>>>,
    pub should_fail: bool,
}

impl MockCodeStore {
    pub fn new(should_fail: bool) -> Self {
        Self {
            codes: Arc::new(Mutex::new(HashMap::new())),
            should_fail,
        }
    }

    /// Rewind a stored code's expiry to simulate elapsed time
    pub fn age_code(&self, method: DeliveryMethod, target: &str, seconds: i64) {
        if let Some(entry) = self
            .codes
            .lock()
            .unwrap()
            .get_mut(&(method, target.to_string()))
        {
            entry.expires_at = entry.expires_at - Duration::seconds(seconds);
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
        if self.should_fail {
            return Err("Code store error".to_string());
        }
        self.codes.lock().unwrap().insert(
            (method, target.to_string()),
            StoredCode {
                code: Some(code.to_string()),
                expires_at: Utc::now() + Duration::seconds(MOCK_CODE_TTL_SECONDS),
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
        if self.should_fail {
            return Err("Code store error".to_string());
        }

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
        if self.should_fail {
            return Err("Code store error".to_string());
        }
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
        if self.should_fail {
            return Err("Code store error".to_string());
        }
        let codes = self.codes.lock().unwrap();
        Ok(codes
            .get(&(method, target.to_string()))
            .map(|entry| (entry.expires_at - Utc::now()).num_seconds())
            .filter(|ttl| *ttl > 0))
    }

    async fn clear_code(&self, method: DeliveryMethod, target: &str) -> Result<(), String> {
        if self.should_fail {
            return Err("Code store error".to_string());
        }
        self.codes.lock().unwrap().remove(&(method, target.to_string()));
        Ok(())
    }
}
