//! Token error types for the authentication flow
//!
//! Verification failures are surfaced to callers as the single
//! `InvalidToken` variant; the distinguishing reason is logged internally
//! and never crosses the trust boundary.

use pa_shared::types::response::ErrorResponse;
use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    /// Uniform rejection for any token that fails verification
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Convert TokenError to ErrorResponse
impl From<TokenError> for ErrorResponse {
    fn from(err: TokenError) -> Self {
        let error_code = match &err {
            TokenError::InvalidToken => "INVALID_TOKEN",
            TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
        };

        ErrorResponse::new(error_code, err.to_string())
    }
}
