//! # Token Validation
//!
//! Server side of the final leg. A co-signed envelope becomes a session
//! token once:
//!
//! 1. both the server and the declared user have signed it,
//! 2. the current time falls inside its window, and
//! 3. in strict mode, no more than `strict_interval` seconds have passed
//!    since the window opened.
//!
//! The strict check measures from `notBefore`, which the issuer sets to
//! the issuance instant.
//!
//! The token is the hex envelope hash, so validating the same envelope
//! twice yields the same token.

use shared_crypto::{KeyPair, PublicKey};

use super::codec;
use super::entities::{Envelope, TimeBounds, Token};
use super::errors::AuthError;
use super::verifier;
use crate::config::{AuthConfig, Network};
use crate::ports::outbound::{SystemTimeSource, TimeSource};

/// Validates a co-signed challenge and derives the session token.
#[derive(Debug, Clone)]
pub struct TokenValidator<C: TimeSource = SystemTimeSource> {
    server: PublicKey,
    user: PublicKey,
    envelope: Envelope,
    network: Network,
    strict_interval: u64,
    clock: C,
}

impl TokenValidator {
    /// Validator reading the system clock.
    ///
    /// # Errors
    ///
    /// `MalformedEnvelope` if `signed_challenge` does not decode.
    pub fn new(
        server: &KeyPair,
        signed_challenge: &str,
        user: PublicKey,
        config: &AuthConfig,
    ) -> Result<Self, AuthError> {
        Self::with_time_source(server, signed_challenge, user, config, SystemTimeSource)
    }
}

impl<C: TimeSource> TokenValidator<C> {
    /// Validator reading time from `clock`.
    pub fn with_time_source(
        server: &KeyPair,
        signed_challenge: &str,
        user: PublicKey,
        config: &AuthConfig,
        clock: C,
    ) -> Result<Self, AuthError> {
        Ok(Self {
            server: server.public_key(),
            user,
            envelope: codec::decode(signed_challenge)?,
            network: config.network.clone(),
            strict_interval: config.strict_interval,
            clock,
        })
    }

    /// The decoded envelope.
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Server identity the envelope must be signed by.
    pub fn server_public_key(&self) -> &PublicKey {
        &self.server
    }

    /// User identity the token is issued for.
    pub fn user_public_key(&self) -> &PublicKey {
        &self.user
    }

    /// The envelope's declared window.
    pub fn time_bounds(&self) -> Result<TimeBounds, AuthError> {
        self.envelope
            .tx
            .time_bounds
            .ok_or(AuthError::MissingTimeBounds)
    }

    /// True if both the server and the user signed the envelope.
    pub fn signed_correctly(&self) -> bool {
        let by_server = verifier::verify(&self.envelope, &self.server, &self.network);
        let by_user = verifier::verify(&self.envelope, &self.user, &self.network);

        by_server && by_user
    }

    /// Run every check against a single reading of the clock.
    ///
    /// # Errors
    ///
    /// - `InvalidSignature` unless both parties signed
    /// - `MalformedEnvelope` if the operation is sourced from either party
    /// - `MissingTimeBounds` if the envelope has no window
    /// - `ChallengeExpired` if now is outside the window, or, when `strict`,
    ///   more than `strict_interval` seconds after `notBefore`
    pub fn validate(&self, strict: bool) -> Result<(), AuthError> {
        let now = self.clock.now();

        if !self.signed_correctly() {
            return Err(AuthError::InvalidSignature);
        }

        if let Some(source) = self.envelope.operation_source() {
            if *source == self.server || *source == self.user {
                return Err(AuthError::malformed("operation sourced from a signer"));
            }
        }

        let bounds = self.time_bounds()?;

        if !bounds.covers(now) {
            return Err(AuthError::ChallengeExpired);
        }

        if strict && now > bounds.min_time.saturating_add(self.strict_interval) {
            return Err(AuthError::ChallengeExpired);
        }

        Ok(())
    }

    /// Strictly validate, then return the hex envelope hash.
    pub fn hash(&self) -> Result<String, AuthError> {
        self.validate(true)?;

        Ok(hex::encode(codec::hash(&self.envelope, &self.network)?))
    }

    /// Strictly validate, then return the full token.
    pub fn token(&self) -> Result<Token, AuthError> {
        let hash = self.hash()?;

        Ok(Token {
            bound_identity: self.user,
            hash,
            is_valid: true,
        })
    }
}
