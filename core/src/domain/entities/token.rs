//! Token claims for bearer tokens issued after OTP login.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bearer token lifetime in seconds (one year)
pub const TOKEN_LIFETIME_SECS: i64 = 31_536_000;

/// Claims structure carried in the token payload
///
/// The payload is immutable once issued; verification only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,

    /// Email address of the subject at issuance time
    pub email: String,

    /// Whether the email was verified at issuance time
    pub email_verified: bool,

    /// Issued at timestamp (Unix seconds)
    pub iat: i64,

    /// Expiration timestamp (Unix seconds)
    pub exp: i64,
}

impl TokenClaims {
    /// Creates new claims expiring `lifetime_secs` after now
    ///
    /// # Arguments
    ///
    /// * `subject_id` - The user's UUID
    /// * `email` - The user's email address
    /// * `email_verified` - Whether the email has been verified
    /// * `lifetime_secs` - Seconds until expiry
    ///
    /// # Returns
    ///
    /// A new `TokenClaims` instance
    pub fn new(
        subject_id: Uuid,
        email: impl Into<String>,
        email_verified: bool,
        lifetime_secs: i64,
    ) -> Self {
        Self::new_at(
            subject_id,
            email,
            email_verified,
            lifetime_secs,
            Utc::now().timestamp(),
        )
    }

    /// Creates new claims with an explicit issuance timestamp
    pub(crate) fn new_at(
        subject_id: Uuid,
        email: impl Into<String>,
        email_verified: bool,
        lifetime_secs: i64,
        issued_at: i64,
    ) -> Self {
        Self {
            sub: subject_id.to_string(),
            email: email.into(),
            email_verified,
            iat: issued_at,
            exp: issued_at + lifetime_secs,
        }
    }

    /// Gets the subject ID from the claims
    ///
    /// # Returns
    ///
    /// `Ok(Uuid)` if the subject can be parsed as a UUID, `Err` otherwise
    pub fn subject_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// Seconds the token stays valid for after issuance
    pub fn lifetime(&self) -> i64 {
        self.exp - self.iat
    }

    /// Checks if the claims have expired
    ///
    /// # Returns
    ///
    /// `true` if the claims have expired, `false` otherwise
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp())
    }

    /// Expiry check against an explicit timestamp
    pub(crate) fn is_expired_at(&self, now: i64) -> bool {
        self.exp < now
    }
}
