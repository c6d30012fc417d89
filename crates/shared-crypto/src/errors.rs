//! Crypto error types.

use thiserror::Error;

/// Identity and signature errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Bytes do not encode a point on the Ed25519 curve
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Signature verification failed
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// StrKey text is not well formed (alphabet, length or checksum)
    #[error("Invalid StrKey: {0}")]
    InvalidStrKey(&'static str),

    /// StrKey decoded fine but is of the other kind (seed vs account id)
    #[error("StrKey version mismatch: expected {expected:#04x}, got {actual:#04x}")]
    StrKeyVersionMismatch {
        /// Version byte the caller asked for
        expected: u8,
        /// Version byte found in the text
        actual: u8,
    },
}
