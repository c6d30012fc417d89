//! # Inbound Ports (Driving Ports / API)
//!
//! Traits that define the public API of this crate.

use crate::domain::entities::Token;
use crate::domain::errors::AuthError;
use shared_crypto::{KeyPair, PublicKey};

/// Challenge-response authentication API.
///
/// This is the main entry point for all three legs of the protocol.
/// Implementations must be thread-safe (`Send + Sync`).
pub trait AuthenticationApi: Send + Sync {
    /// Issue a server-signed challenge.
    ///
    /// `expires_in` overrides the configured lifetime when given and
    /// non-zero.
    fn issue_challenge(&self, server: &KeyPair, expires_in: Option<u64>)
        -> Result<String, AuthError>;

    /// Countersign a challenge after checking `expected_server` issued it.
    ///
    /// # Security
    /// - Never signs a challenge the expected server has not signed
    fn countersign_challenge(
        &self,
        user: &KeyPair,
        challenge: &str,
        expected_server: &PublicKey,
    ) -> Result<String, AuthError>;

    /// Check both signatures and the time window of a co-signed challenge.
    fn validate_challenge(
        &self,
        server: &KeyPair,
        signed_challenge: &str,
        user: &PublicKey,
        strict: bool,
    ) -> Result<(), AuthError>;

    /// Strictly validate and return the hex session token.
    fn token_hash(
        &self,
        server: &KeyPair,
        signed_challenge: &str,
        user: &PublicKey,
    ) -> Result<String, AuthError>;

    /// Strictly validate and return the full token.
    fn token(
        &self,
        server: &KeyPair,
        signed_challenge: &str,
        user: &PublicKey,
    ) -> Result<Token, AuthError>;
}
