//! Business services containing domain logic and use cases.

pub mod credential;
pub mod password;
pub mod recovery;
pub mod session;
pub mod token;
pub mod verification;

// Re-export commonly used types
pub use credential::{CredentialService, CredentialServiceConfig};
pub use password::PasswordService;
pub use recovery::{RecoveryFlow, RecoveryGateway};
pub use session::{SessionContext, SessionStore};
pub use token::{TokenService, TokenServiceConfig};
pub use verification::{
    CodeDelivery, CodeStore, CodeVerification, SendCodeResult, VerificationService,
    VerificationServiceConfig,
};
