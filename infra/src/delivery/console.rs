//! Console code delivery implementation
//!
//! A development implementation of the code delivery channel. Instead of
//! sending anything, it prints the verification code to the console so the
//! recovery flows can be exercised without an SMS or email provider.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use bv_core::domain::entities::verification_code::DeliveryMethod;
use bv_core::services::verification::CodeDelivery;
use bv_shared::utils::{mask_email, mask_phone};

/// Console delivery channel for development
///
/// This implementation:
/// - Prints verification codes to the console
/// - Generates message IDs in the same shape a real provider would
/// - Tracks message count for testing
#[derive(Clone)]
pub struct ConsoleCodeDelivery {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to print messages to console
    console_output: bool,
}

impl ConsoleCodeDelivery {
    /// Create a new console delivery channel
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            console_output: true,
        }
    }

    /// Create a channel with console printing disabled (for tests)
    pub fn silent() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            console_output: false,
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    fn masked(method: DeliveryMethod, target: &str) -> String {
        match method {
            DeliveryMethod::Email => mask_email(target),
            DeliveryMethod::Phone => mask_phone(target),
        }
    }
}

impl Default for ConsoleCodeDelivery {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CodeDelivery for ConsoleCodeDelivery {
    async fn deliver(
        &self,
        method: DeliveryMethod,
        target: &str,
        code: &str,
    ) -> Result<String, String> {
        let message_id = format!("console-{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;
        let masked_target = Self::masked(method, target);

        if self.console_output {
            // Development output: the code is shown in full on purpose,
            // this channel is what stands in for the real provider
            println!("\n{}", "=".repeat(60));
            println!("CONSOLE DELIVERY - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("Channel: {}", method.as_str());
            println!("To: {}", target);
            println!("Message ID: {}", message_id);
            println!("Your BookVerse verification code is: {}", code);
            println!("{}\n", "=".repeat(60));
        }

        // Structured logging keeps the target masked
        info!(
            target: "code_delivery",
            provider = "console",
            method = method.as_str(),
            recipient = %masked_target,
            message_id = %message_id,
            "Verification code delivered (console)"
        );

        Ok(message_id)
    }
}
