//! Admin password check for the bulk delete endpoints.
//!
//! Only the SHA-256 digest is kept in memory. Candidates are hashed and the
//! two digests compared with `subtle::ConstantTimeEq`.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use super::config::ConfigError;

/// The single admin credential.
#[derive(Clone)]
pub struct AdminPassword {
    digest: [u8; 32],
}

impl AdminPassword {
    /// Hex digest of a plaintext password.
    pub fn digest_hex(password: &str) -> String {
        hex::encode(Sha256::digest(password.as_bytes()))
    }

    /// Build from a plaintext password.
    pub fn from_plaintext(password: &str) -> Self {
        Self {
            digest: Sha256::digest(password.as_bytes()).into(),
        }
    }

    /// Build from a hex-encoded digest.
    pub fn from_hex(digest_hex: &str) -> Result<Self, ConfigError> {
        let bytes = hex::decode(digest_hex.trim())
            .map_err(|e| ConfigError::InvalidDigest(e.to_string()))?;
        let digest: [u8; 32] = bytes
            .try_into()
            .map_err(|b: Vec<u8>| ConfigError::InvalidDigest(format!("{} bytes, need 32", b.len())))?;
        Ok(Self { digest })
    }

    /// Check a candidate password.
    pub fn verify(&self, candidate: &str) -> bool {
        let candidate: [u8; 32] = Sha256::digest(candidate.as_bytes()).into();
        candidate.ct_eq(&self.digest).into()
    }
}

impl std::fmt::Debug for AdminPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AdminPassword(<redacted>)")
    }
}
