//! Recovery flow state machine

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::domain::entities::verification_code::{
    DeliveryMethod, CODE_LENGTH, RESEND_COOLDOWN_SECONDS,
};
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};

use super::traits::RecoveryGateway;
use super::types::{
    CodeRequest, MethodForm, RecoveryMethod, RecoveryStep, SubmitOutcome, REDIRECT_DELAY_SECONDS,
};

/// Drives password recovery from method choice to a completed reset
///
/// The flow holds everything the user has entered and talks to the server
/// through a [`RecoveryGateway`]. A failed submission keeps the step and
/// every collected field so the user can correct and retry. A submission
/// holds the exclusive borrow for its whole round trip, so a second
/// submission cannot start while one is outstanding.
pub struct RecoveryFlow<G: RecoveryGateway> {
    /// Gateway for the server-side recovery calls
    gateway: Arc<G>,
    /// Current step
    pub(crate) step: RecoveryStep,
    /// Fields collected for the chosen method
    pub(crate) form: Option<MethodForm>,
    /// Deadline before another code may be requested
    pub(crate) cooldown_until: Option<DateTime<Utc>>,
}

impl<G: RecoveryGateway> RecoveryFlow<G> {
    /// Create a flow on the method-choice step
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            step: RecoveryStep::ChooseMethod,
            form: None,
            cooldown_until: None,
        }
    }

    /// Current step
    pub fn step(&self) -> RecoveryStep {
        self.step
    }

    /// The chosen method, if one has been picked
    pub fn method(&self) -> Option<RecoveryMethod> {
        self.form.as_ref().map(|form| form.method())
    }

    /// Collected fields for the chosen method
    pub fn form(&self) -> Option<&MethodForm> {
        self.form.as_ref()
    }

    /// Mutable access to the collected fields
    pub fn form_mut(&mut self) -> Option<&mut MethodForm> {
        self.form.as_mut()
    }

    /// Pick a recovery method and move to the verify step
    ///
    /// Starts from a fresh form; switching methods discards whatever the
    /// previous method had collected.
    pub fn choose_method(&mut self, method: RecoveryMethod) {
        tracing::debug!(method = ?method, event = "recovery_method_chosen", "Recovery method chosen");
        self.form = Some(MethodForm::empty(method));
        self.step = RecoveryStep::Verify;
    }

    /// Return from the verify step to method choice, keeping the fields
    pub fn back(&mut self) {
        if self.step == RecoveryStep::Verify {
            self.step = RecoveryStep::ChooseMethod;
        }
    }

    /// Empty the collected code digits
    ///
    /// Used when a code was consumed or expired server-side and a fresh
    /// one must be requested.
    pub fn clear_code(&mut self) {
        if let Some(MethodForm::Phone { code, .. }) = &mut self.form {
            code.clear();
        }
    }

    /// Seconds left before another code may be requested, zero when free
    pub fn cooldown_remaining(&self) -> i64 {
        match self.cooldown_until {
            Some(until) => (until - Utc::now()).num_seconds().max(0),
            None => 0,
        }
    }

    /// Whether the send-code control is active
    pub fn can_request_code(&self) -> bool {
        match &self.form {
            Some(MethodForm::Phone { phone, .. }) => {
                self.step == RecoveryStep::Verify
                    && !phone.trim().is_empty()
                    && self.cooldown_remaining() == 0
            }
            _ => false,
        }
    }

    /// Whether the submit control is active for the current form
    pub fn can_submit(&self) -> bool {
        if self.step != RecoveryStep::Verify {
            return false;
        }
        match &self.form {
            Some(
                MethodForm::Email {
                    email,
                    answer,
                    new_password,
                    confirm_password,
                }
                | MethodForm::Security {
                    email,
                    answer,
                    new_password,
                    confirm_password,
                },
            ) => {
                !email.trim().is_empty()
                    && !answer.trim().is_empty()
                    && !new_password.trim().is_empty()
                    && !confirm_password.trim().is_empty()
                    && new_password == confirm_password
            }
            Some(MethodForm::Phone {
                phone,
                code,
                new_password,
            }) => {
                !phone.trim().is_empty()
                    && is_complete_code(code)
                    && !new_password.trim().is_empty()
            }
            None => false,
        }
    }

    /// Request a one-time code for the phone method
    ///
    /// This method:
    /// 1. Requires the phone form with a phone number entered
    /// 2. Refuses while the resend cooldown is running
    /// 3. Asks the gateway to dispatch a code
    /// 4. Starts the cooldown clock only when the server accepted
    ///
    /// # Returns
    ///
    /// * `Ok(CodeRequest)` - Sent with the resend deadline, or refused
    /// * `Err(DomainError)` - Local gate failed or the transport broke
    pub async fn request_code(&mut self) -> DomainResult<CodeRequest> {
        // Step 1: Only the phone method requests codes
        let Some(MethodForm::Phone { phone, .. }) = &self.form else {
            return Err(DomainError::ValidationErr(ValidationError::InvalidFormat {
                field: "method".to_string(),
            }));
        };
        require_field("phone", phone)?;

        // Step 2: The cooldown clock gates resends locally
        let remaining = self.cooldown_remaining();
        if remaining > 0 {
            return Err(DomainError::Auth(AuthError::ResendCooldown {
                seconds: remaining,
            }));
        }

        // Step 3: Dispatch through the gateway
        let response = match self
            .gateway
            .send_verification(DeliveryMethod::Phone, phone)
            .await
        {
            Ok(response) => response,
            Err(transport) => {
                tracing::error!(
                    event = "recovery_send_failed",
                    "Failed to request verification code: {}",
                    transport
                );
                return Err(DomainError::Internal {
                    message: format!("Failed to request verification code: {}", transport),
                });
            }
        };

        // Step 4: The cooldown starts only once a code is on its way
        if response.success {
            let next_resend_at = Utc::now() + Duration::seconds(RESEND_COOLDOWN_SECONDS);
            self.cooldown_until = Some(next_resend_at);
            Ok(CodeRequest::Sent { next_resend_at })
        } else {
            Ok(CodeRequest::Refused {
                message: response.message,
            })
        }
    }

    /// Submit the collected fields for the chosen method
    ///
    /// Local gates run first and never reach the network: every field the
    /// method needs must be present, password and confirmation must agree,
    /// and the phone method needs a complete six-digit code. A submission
    /// the server refuses leaves the flow on the verify step with all
    /// fields intact.
    ///
    /// # Returns
    ///
    /// * `Ok(SubmitOutcome::Accepted)` - Reset done, flow is on `Success`
    /// * `Ok(SubmitOutcome::Rejected)` - Server refused, flow unchanged
    /// * `Err(DomainError)` - A local gate failed or the transport broke
    pub async fn submit(&mut self) -> DomainResult<SubmitOutcome> {
        // Submission only exists on the verify step
        if self.step != RecoveryStep::Verify {
            return Err(DomainError::ValidationErr(ValidationError::RequiredField {
                field: "method".to_string(),
            }));
        }
        let form = self.form.as_ref().ok_or_else(|| {
            DomainError::ValidationErr(ValidationError::RequiredField {
                field: "method".to_string(),
            })
        })?;

        let result = match form {
            // Email and security both resolve to the answer-based reset;
            // the or-pattern keeps that equivalence visible
            MethodForm::Email {
                email,
                answer,
                new_password,
                confirm_password,
            }
            | MethodForm::Security {
                email,
                answer,
                new_password,
                confirm_password,
            } => {
                require_field("email", email)?;
                require_field("answer", answer)?;
                require_field("new_password", new_password)?;
                require_field("confirm_password", confirm_password)?;
                if new_password != confirm_password {
                    return Err(DomainError::ValidationErr(ValidationError::PasswordMismatch));
                }
                self.gateway
                    .forgot_password(email, answer, new_password)
                    .await
            }
            MethodForm::Phone {
                phone,
                code,
                new_password,
            } => {
                require_field("phone", phone)?;
                require_field("new_password", new_password)?;
                if code.len() != CODE_LENGTH {
                    return Err(DomainError::ValidationErr(ValidationError::InvalidLength {
                        field: "code".to_string(),
                        expected: CODE_LENGTH,
                        actual: code.len(),
                    }));
                }
                if !code.chars().all(|c| c.is_ascii_digit()) {
                    return Err(DomainError::ValidationErr(ValidationError::InvalidFormat {
                        field: "code".to_string(),
                    }));
                }
                self.gateway
                    .verify_reset(DeliveryMethod::Phone, phone, code, new_password)
                    .await
            }
        };

        match result {
            Ok(response) if response.success => {
                self.step = RecoveryStep::Success;
                let redirect_at = Utc::now() + Duration::seconds(REDIRECT_DELAY_SECONDS);
                tracing::info!(event = "recovery_succeeded", "Password reset accepted");
                Ok(SubmitOutcome::Accepted { redirect_at })
            }
            Ok(response) => {
                tracing::warn!(
                    message = %response.message,
                    event = "recovery_rejected",
                    "Password reset rejected by the server"
                );
                Ok(SubmitOutcome::Rejected {
                    message: response.message,
                })
            }
            Err(transport) => {
                tracing::error!(
                    event = "recovery_request_failed",
                    "Password reset request failed: {}",
                    transport
                );
                Err(DomainError::Internal {
                    message: format!("Password reset request failed: {}", transport),
                })
            }
        }
    }
}

/// Exactly six ASCII digits
fn is_complete_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.chars().all(|c| c.is_ascii_digit())
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
