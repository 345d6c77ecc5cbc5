//! Signing key loading for the token service

use crate::errors::{DomainError, DomainResult};

/// Length of a hex-encoded 64-byte signing key
const HEX_KEY_LEN: usize = 128;

/// Raw HMAC signing key, normalized once at load time.
///
/// Deployments supply the shared secret either as a UTF-8 passphrase or as
/// a 128-character hex encoding of a 64-byte key. Both forms are decoded
/// here, at construction; the signing and verification paths only ever see
/// raw bytes, so peers configured with either representation of the same
/// key interoperate.
#[derive(Clone)]
pub struct SigningKey {
    bytes: Vec<u8>,
}

impl SigningKey {
    /// Loads a key from the configured secret string
    ///
    /// A secret of exactly 128 hex digits is decoded to the raw 64-byte
    /// key; any other non-empty string is used as UTF-8 bytes.
    pub fn from_secret(secret: &str) -> DomainResult<Self> {
        if secret.is_empty() {
            return Err(DomainError::Validation {
                message: "Token secret must not be empty".to_string(),
            });
        }

        if secret.len() == HEX_KEY_LEN && secret.bytes().all(|b| b.is_ascii_hexdigit()) {
            let bytes = hex::decode(secret).map_err(|e| DomainError::Internal {
                message: format!("Failed to decode hex secret: {}", e),
            })?;
            return Ok(Self { bytes });
        }

        Ok(Self {
            bytes: secret.as_bytes().to_vec(),
        })
    }

    /// Creates a key directly from raw bytes
    pub fn from_raw(bytes: Vec<u8>) -> DomainResult<Self> {
        if bytes.is_empty() {
            return Err(DomainError::Validation {
                message: "Signing key must not be empty".to_string(),
            });
        }

        Ok(Self { bytes })
    }

    /// Raw key bytes used as the HMAC key
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material stays out of logs
        f.debug_struct("SigningKey")
            .field("len", &self.bytes.len())
            .finish()
    }
}
