//! Authentication route handlers
//!
//! This module contains all credential and recovery endpoints:
//! - Registration and login
//! - Password recovery (security answer and delivered code)
//! - Profile updates
//! - Session and role probes used by the storefront router

pub mod access;
pub mod forgot_password;
pub mod login;
pub mod profile;
pub mod register;
pub mod send_verification;
pub mod verify_reset;

pub use access::{admin_auth, user_auth};
pub use forgot_password::forgot_password;
pub use login::login;
pub use profile::update_profile;
pub use register::register;
pub use send_verification::send_verification;
pub use verify_reset::verify_reset;
