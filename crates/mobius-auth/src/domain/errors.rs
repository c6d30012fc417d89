//! # Authentication Errors
//!
//! Every failure is fatal for the call that raised it. Nothing here is
//! retried internally; fetching a fresh challenge is the caller's business.

use thiserror::Error;

/// Errors raised while issuing, countersigning or validating a challenge.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The text is not a well-formed envelope (truncated, bad checksum,
    /// unknown version, undecodable body), or its operation is not sourced
    /// from a throwaway account.
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// The challenge is not signed by the expected server identity.
    #[error("Wrong challenge transaction signature")]
    UntrustedChallenge,

    /// A required signature is missing or does not verify.
    #[error("Invalid challenge signature")]
    InvalidSignature,

    /// The envelope carries no time bounds.
    #[error("Wrong challenge transaction structure: missing time bounds")]
    MissingTimeBounds,

    /// Outside the time window, or too long after issuance in strict mode.
    #[error("Challenge transaction expired")]
    ChallengeExpired,

    /// The ledger collaborator failed while resolving a validated token.
    #[error("Ledger lookup failed: {0}")]
    Ledger(String),
}

impl AuthError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedEnvelope(reason.into())
    }
}
