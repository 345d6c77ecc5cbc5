//! Configuration module
//!
//! Configuration is read from the process environment once at startup and
//! handed to services explicitly; nothing in the domain layer performs
//! ambient environment lookups.

pub mod auth;

// Re-export commonly used types
pub use auth::TokenConfig;
