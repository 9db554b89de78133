//! Types for the password recovery flow

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Seconds to wait on the success view before redirecting to login
pub const REDIRECT_DELAY_SECONDS: i64 = 2;

/// Security questions offered during answer-based recovery
///
/// Only the answer travels to the server; the chosen question is
/// presentation state.
pub const SECURITY_QUESTIONS: [&str; 3] = [
    "What is your favorite sport?",
    "What was your first pet's name?",
    "What city were you born in?",
];

/// Step the recovery flow is currently on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStep {
    /// Picking one of the three recovery methods
    ChooseMethod,
    /// Collecting proof of identity and the replacement password
    Verify,
    /// Reset accepted; redirect to login is pending
    Success,
}

/// Recovery method offered on the entry step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryMethod {
    Email,
    Phone,
    Security,
}

impl RecoveryMethod {
    /// All methods, in the order the entry step presents them
    pub fn all() -> [RecoveryMethod; 3] {
        [
            RecoveryMethod::Email,
            RecoveryMethod::Phone,
            RecoveryMethod::Security,
        ]
    }

    /// Card title shown on the entry step
    pub fn title(&self) -> &'static str {
        match self {
            RecoveryMethod::Email => "Email",
            RecoveryMethod::Phone => "Phone",
            RecoveryMethod::Security => "Security Questions",
        }
    }

    /// Card description shown on the entry step
    ///
    /// The email wording promises a reset link, but the method actually
    /// collects the security answer in the same submission. The copy is
    /// kept as the product shipped it.
    pub fn description(&self) -> &'static str {
        match self {
            RecoveryMethod::Email => "Get reset link via email",
            RecoveryMethod::Phone => "Get code via SMS",
            RecoveryMethod::Security => "Answer security questions",
        }
    }
}

/// Fields collected on the verify step, one variant per method
///
/// Each variant carries only what its method submits. The email and
/// security methods both resolve to the answer-plus-password reset call;
/// they differ in how the form is presented, not in what the server sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodForm {
    Email {
        email: String,
        answer: String,
        new_password: String,
        confirm_password: String,
    },
    Phone {
        phone: String,
        code: String,
        new_password: String,
    },
    Security {
        email: String,
        answer: String,
        new_password: String,
        confirm_password: String,
    },
}

impl MethodForm {
    /// Empty form for the given method
    pub fn empty(method: RecoveryMethod) -> Self {
        match method {
            RecoveryMethod::Email => MethodForm::Email {
                email: String::new(),
                answer: String::new(),
                new_password: String::new(),
                confirm_password: String::new(),
            },
            RecoveryMethod::Phone => MethodForm::Phone {
                phone: String::new(),
                code: String::new(),
                new_password: String::new(),
            },
            RecoveryMethod::Security => MethodForm::Security {
                email: String::new(),
                answer: String::new(),
                new_password: String::new(),
                confirm_password: String::new(),
            },
        }
    }

    /// The method this form belongs to
    pub fn method(&self) -> RecoveryMethod {
        match self {
            MethodForm::Email { .. } => RecoveryMethod::Email,
            MethodForm::Phone { .. } => RecoveryMethod::Phone,
            MethodForm::Security { .. } => RecoveryMethod::Security,
        }
    }
}

/// Server response envelope for recovery calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayResponse {
    /// Whether the server accepted the operation
    pub success: bool,
    /// Human-readable outcome message
    pub message: String,
}

/// Outcome of a reset submission that reached the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The reset was accepted; the flow is on the success step
    Accepted {
        /// When the caller should redirect to login
        redirect_at: DateTime<Utc>,
    },
    /// The server refused the reset; the flow stays on the verify step
    /// with every collected field intact
    Rejected { message: String },
}

/// Outcome of a verification code request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeRequest {
    /// A code was dispatched; resending is blocked until the deadline
    Sent { next_resend_at: DateTime<Utc> },
    /// The server refused to send; no cooldown was started
    Refused { message: String },
}
