//! # Challenge Countersigning
//!
//! Client side of the second leg. A client only ever signs a challenge it
//! can attribute to the server it meant to talk to; otherwise it could be
//! tricked into signing an arbitrary attacker-supplied envelope.

use shared_crypto::{KeyPair, PublicKey};

use super::codec;
use super::errors::AuthError;
use super::verifier;
use crate::config::Network;

/// Adds the user's signature to server-issued challenges.
#[derive(Debug, Clone)]
pub struct ChallengeCountersigner {
    network: Network,
}

impl ChallengeCountersigner {
    /// Countersigner for envelopes bound to `network`.
    pub fn new(network: Network) -> Self {
        Self { network }
    }

    /// Verify the server's signature, then append the user's.
    ///
    /// # Errors
    ///
    /// - `MalformedEnvelope` if `challenge` does not decode
    /// - `MalformedEnvelope` if the operation is sourced from `user`, which
    ///   would make the user's signature authorize it
    /// - `UntrustedChallenge` if `expected_server` has not signed it
    pub fn countersign(
        &self,
        user: &KeyPair,
        challenge: &str,
        expected_server: &PublicKey,
    ) -> Result<String, AuthError> {
        let mut envelope = codec::decode(challenge)?;

        if envelope.operation_source() == Some(&user.public_key()) {
            return Err(AuthError::malformed("operation sourced from a signer"));
        }

        if !verifier::verify(&envelope, expected_server, &self.network) {
            return Err(AuthError::UntrustedChallenge);
        }

        codec::sign(&mut envelope, user, &self.network)?;

        codec::encode(&envelope)
    }
}
