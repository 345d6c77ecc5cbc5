//! Configuration for the token service

use pa_shared::config::TokenConfig;

use crate::domain::entities::token::TOKEN_LIFETIME_SECS;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Token signing secret
    pub secret: String,
    /// Token lifetime in seconds
    pub token_lifetime_secs: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            secret: "development-secret-please-change-in-production".to_string(),
            token_lifetime_secs: TOKEN_LIFETIME_SECS,
        }
    }
}

impl From<TokenConfig> for TokenServiceConfig {
    fn from(config: TokenConfig) -> Self {
        Self {
            secret: config.secret,
            token_lifetime_secs: config.token_lifetime_secs,
        }
    }
}
