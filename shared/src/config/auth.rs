//! Authentication configuration

use serde::{Deserialize, Serialize};

/// Bearer token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenConfig {
    /// Shared secret used to sign bearer tokens
    pub secret: String,

    /// Token lifetime in seconds
    pub token_lifetime_secs: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: String::from("development-secret-please-change-in-production"),
            token_lifetime_secs: 31_536_000, // 365 days
        }
    }
}

impl TokenConfig {
    /// Create a new token configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set token lifetime in days
    pub fn with_lifetime_days(mut self, days: i64) -> Self {
        self.token_lifetime_secs = days * 86_400;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "development-secret-please-change-in-production"
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let secret = std::env::var("TOKEN_SECRET")
            .unwrap_or_else(|_| "development-secret-please-change-in-production".to_string());
        let token_lifetime_secs = std::env::var("TOKEN_LIFETIME_SECS")
            .unwrap_or_else(|_| "31536000".to_string())
            .parse()
            .unwrap_or(31_536_000);

        Self {
            secret,
            token_lifetime_secs,
        }
    }
}
