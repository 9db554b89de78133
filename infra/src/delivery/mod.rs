//! Verification code delivery channels
//!
//! This module contains implementations of the core `CodeDelivery` trait.
//! The console channel is the development default; a real SMS or email
//! provider plugs in behind the same trait.

pub mod console;

pub use console::ConsoleCodeDelivery;
