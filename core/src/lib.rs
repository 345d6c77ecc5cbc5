//! # PastorAgenda Core
//!
//! Core business logic and domain layer for the PastorAgenda backend.
//! This crate contains the token claims entity, the token service backing
//! the passwordless login flow, and the error types shared by both.

pub mod domain;
pub mod services;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::*;
pub use services::*;
pub use errors::*;
