//! Main token service implementation

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;
use uuid::Uuid;

use crate::domain::entities::token::TokenClaims;
use crate::errors::{DomainError, DomainResult, TokenError};

use super::config::TokenServiceConfig;
use super::key::SigningKey;

type HmacSha256 = Hmac<Sha256>;

/// JOSE header carried as the first token segment
#[derive(Serialize)]
struct Header {
    alg: &'static str,
    typ: &'static str,
}

impl Header {
    fn hs256() -> Self {
        Self {
            alg: "HS256",
            typ: "JWT",
        }
    }
}

/// Reason a token failed verification, logged internally only
enum RejectReason {
    Malformed,
    BadSignature,
    Expired,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::Malformed => write!(f, "malformed"),
            RejectReason::BadSignature => write!(f, "bad_signature"),
            RejectReason::Expired => write!(f, "expired"),
        }
    }
}

/// Service issuing and verifying the bearer tokens used by the
/// passwordless login flow
///
/// The service is stateless: both operations are pure computations over
/// the token and the signing key, safe to call concurrently. There is no
/// server-side token state; a token dies only by expiry or client discard.
#[derive(Debug)]
pub struct TokenService {
    key: SigningKey,
    token_lifetime_secs: i64,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `config` - Token service configuration
    ///
    /// # Returns
    ///
    /// A new `TokenService` instance or error if the secret is unusable
    pub fn new(config: TokenServiceConfig) -> DomainResult<Self> {
        let key = SigningKey::from_secret(&config.secret)?;
        Self::with_key(key, config.token_lifetime_secs)
    }

    /// Creates a token service with an already-loaded signing key
    pub fn with_key(key: SigningKey, token_lifetime_secs: i64) -> DomainResult<Self> {
        if token_lifetime_secs <= 0 {
            return Err(DomainError::Validation {
                message: "Token lifetime must be positive".to_string(),
            });
        }

        Ok(Self {
            key,
            token_lifetime_secs,
        })
    }

    /// Issues a signed bearer token for an authenticated subject
    ///
    /// The caller is trusted to have proven the subject's identity (the
    /// OTP check) before calling this.
    ///
    /// # Arguments
    ///
    /// * `subject_id` - The user's UUID
    /// * `email` - The user's email address
    /// * `email_verified` - Whether the email has been verified
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The compact three-segment token
    /// * `Err(DomainError)` - Empty email or token encoding failed
    pub fn issue(
        &self,
        subject_id: Uuid,
        email: &str,
        email_verified: bool,
    ) -> DomainResult<String> {
        self.issue_at(subject_id, email, email_verified, Utc::now().timestamp())
    }

    /// Issues a token with an explicit issuance timestamp
    pub(crate) fn issue_at(
        &self,
        subject_id: Uuid,
        email: &str,
        email_verified: bool,
        issued_at: i64,
    ) -> DomainResult<String> {
        if email.is_empty() {
            return Err(DomainError::Validation {
                message: "Email must not be empty".to_string(),
            });
        }

        let claims = TokenClaims::new_at(
            subject_id,
            email,
            email_verified,
            self.token_lifetime_secs,
            issued_at,
        );

        let header = serde_json::to_vec(&Header::hs256())
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))?;
        let payload = serde_json::to_vec(&claims)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))?;

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(payload)
        );
        let signature = self.sign(&signing_input)?;

        tracing::debug!(
            subject = %claims.sub,
            expires_at = claims.exp,
            event = "token_issued",
            "Issued bearer token"
        );

        Ok(format!(
            "{}.{}",
            signing_input,
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }

    /// Verifies a bearer token and returns its claims
    ///
    /// Every failure collapses to `TokenError::InvalidToken`; callers must
    /// treat it as a hard authentication failure and answer with an
    /// unauthorized status. The underlying reason is logged at debug level
    /// and never returned.
    ///
    /// # Arguments
    ///
    /// * `token` - The compact token string to verify
    ///
    /// # Returns
    ///
    /// * `Ok(TokenClaims)` - The decoded claims if valid
    /// * `Err(DomainError)` - Token is invalid
    pub fn verify(&self, token: &str) -> DomainResult<TokenClaims> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verifies a token against an explicit timestamp
    pub(crate) fn verify_at(&self, token: &str, now: i64) -> DomainResult<TokenClaims> {
        self.check(token, now).map_err(|reason| {
            tracing::debug!(
                reason = %reason,
                event = "token_rejected",
                "Rejected bearer token"
            );
            DomainError::Token(TokenError::InvalidToken)
        })
    }

    fn check(&self, token: &str, now: i64) -> Result<TokenClaims, RejectReason> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 || segments.iter().any(|s| s.is_empty()) {
            return Err(RejectReason::Malformed);
        }

        let signing_input = format!("{}.{}", segments[0], segments[1]);
        let expected = self
            .sign(&signing_input)
            .map_err(|_| RejectReason::BadSignature)?;
        let provided = URL_SAFE_NO_PAD
            .decode(segments[2])
            .map_err(|_| RejectReason::Malformed)?;

        // Constant-time comparison over the full signature to prevent
        // timing attacks; a length mismatch is an immediate reject
        if expected.len() != provided.len() || !constant_time_eq(&expected, &provided) {
            return Err(RejectReason::BadSignature);
        }

        let payload = URL_SAFE_NO_PAD
            .decode(segments[1])
            .map_err(|_| RejectReason::Malformed)?;
        let claims: TokenClaims =
            serde_json::from_slice(&payload).map_err(|_| RejectReason::Malformed)?;

        if claims.is_expired_at(now) {
            return Err(RejectReason::Expired);
        }

        Ok(claims)
    }

    /// HMAC-SHA256 over the dot-joined header and payload segments
    fn sign(&self, signing_input: &str) -> DomainResult<Vec<u8>> {
        let mut mac =
            HmacSha256::new_from_slice(self.key.as_bytes()).map_err(|_| DomainError::Internal {
                message: "Signing key rejected by HMAC".to_string(),
            })?;
        mac.update(signing_input.as_bytes());
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

/// Extracts the token from an `Authorization` header value
///
/// # Returns
///
/// The token following the `Bearer ` scheme, or `None` if the value does
/// not carry one
pub fn extract_bearer_token(header_value: &str) -> Option<&str> {
    let token = header_value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
