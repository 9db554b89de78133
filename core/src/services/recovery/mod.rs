//! Password recovery flow
//!
//! Client-side state machine that walks a user from choosing a recovery
//! method through identity proof to a completed password reset. Server
//! calls go through the [`RecoveryGateway`] trait so the flow can be
//! driven against any transport.

mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use service::RecoveryFlow;
pub use traits::RecoveryGateway;
pub use types::{
    CodeRequest, GatewayResponse, MethodForm, RecoveryMethod, RecoveryStep, SubmitOutcome,
    REDIRECT_DELAY_SECONDS, SECURITY_QUESTIONS,
};
