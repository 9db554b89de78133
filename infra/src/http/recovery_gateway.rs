//! HTTP implementation of the recovery gateway
//!
//! Translates each `RecoveryGateway` call into the matching `/api/v1/auth`
//! endpoint. The server encodes a rejected operation in the response
//! envelope, so any body that parses is an `Ok` here even when the HTTP
//! status is an error; only transport and decoding failures become `Err`.

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use bv_core::domain::entities::verification_code::DeliveryMethod;
use bv_core::services::recovery::{GatewayResponse, RecoveryGateway};

use crate::InfrastructureError;

/// Request timeout for gateway calls
const REQUEST_TIMEOUT_SECONDS: u64 = 10;

/// Reqwest-backed gateway for the recovery endpoints
pub struct HttpRecoveryGateway {
    /// HTTP client with connection pooling
    client: reqwest::Client,
    /// Server base URL without a trailing slash
    base_url: String,
}

impl HttpRecoveryGateway {
    /// Create a new gateway for the given server base URL
    ///
    /// # Example
    /// ```no_run
    /// use bv_infra::http::HttpRecoveryGateway;
    ///
    /// fn create() -> Result<HttpRecoveryGateway, Box<dyn std::error::Error>> {
    ///     let gateway = HttpRecoveryGateway::new("http://localhost:8080")?;
    ///     Ok(gateway)
    /// }
    /// ```
    pub fn new(base_url: impl Into<String>) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("bookverse-client/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    /// Build the full URL for an auth endpoint
    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/v1/auth/{}", self.base_url, path)
    }

    /// The request body key the server expects for this delivery method
    fn target_key(method: DeliveryMethod) -> &'static str {
        match method {
            DeliveryMethod::Email => "email",
            DeliveryMethod::Phone => "phone",
        }
    }

    /// POST a JSON payload and parse the response envelope
    async fn post_json(
        &self,
        path: &str,
        payload: &serde_json::Value,
    ) -> Result<GatewayResponse, String> {
        let url = self.endpoint(path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| format!("Request to {} failed: {}", path, e))?;

        // The envelope carries the verdict even on 4xx statuses
        response
            .json::<GatewayResponse>()
            .await
            .map_err(|e| format!("Unreadable response from {}: {}", path, e))
    }
}

#[async_trait]
impl RecoveryGateway for HttpRecoveryGateway {
    async fn forgot_password(
        &self,
        email: &str,
        answer: &str,
        new_password: &str,
    ) -> Result<GatewayResponse, String> {
        let payload = json!({
            "email": email,
            "answer": answer,
            "newPassword": new_password,
        });
        self.post_json("forgot-password", &payload).await
    }

    async fn send_verification(
        &self,
        method: DeliveryMethod,
        target: &str,
    ) -> Result<GatewayResponse, String> {
        let target_key = Self::target_key(method);
        let payload = json!({
            target_key: target,
            "method": method.as_str(),
        });
        self.post_json("send-verification", &payload).await
    }

    async fn verify_reset(
        &self,
        method: DeliveryMethod,
        target: &str,
        code: &str,
        new_password: &str,
    ) -> Result<GatewayResponse, String> {
        let target_key = Self::target_key(method);
        let payload = json!({
            target_key: target,
            "verificationCode": code,
            "newPassword": new_password,
        });
        self.post_json("verify-reset", &payload).await
    }
}
