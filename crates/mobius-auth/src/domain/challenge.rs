//! # Challenge Issuance
//!
//! Server side of the first leg: build a fresh envelope bound to a time
//! window and sign it with the server identity.
//!
//! ## Envelope Shape
//!
//! ```text
//! source     = server account
//! seq_num    = 99_999_999 - uniform[0, 65536)   (nonce, never a live sequence)
//! time       = [now, now + expires_in]
//! memo       = "Mobius authentication"
//! operations = [ payment 0.000001 native, from <ephemeral>, to server ]
//! signatures = [ server ]
//! ```
//!
//! The ephemeral operation source is generated per challenge and dropped
//! straight away. Nobody holds its key, so the envelope can never be
//! submitted as a real payment.

use rand::Rng;
use shared_crypto::KeyPair;

use super::codec;
use super::entities::{
    Envelope, Memo, Operation, TimeBounds, Transaction, BASE_FEE, CHALLENGE_PAYMENT_AMOUNT,
    SEQUENCE_CEILING, SEQUENCE_SPREAD,
};
use super::errors::AuthError;
use crate::config::{AuthConfig, Network};
use crate::ports::outbound::{SystemTimeSource, TimeSource};

/// Pick a sequence nonce from the narrow high range.
pub fn random_sequence() -> i64 {
    SEQUENCE_CEILING - rand::thread_rng().gen_range(0..SEQUENCE_SPREAD)
}

/// Assemble and sign a challenge envelope.
///
/// `now` becomes the window's lower bound.
pub fn build_challenge(
    server: &KeyPair,
    expires_in: u64,
    network: &Network,
    now: u64,
) -> Result<Envelope, AuthError> {
    let server_key = server.public_key();
    let ephemeral = KeyPair::generate();

    let operation =
        Operation::native_payment(ephemeral.public_key(), server_key, CHALLENGE_PAYMENT_AMOUNT);

    let mut envelope = Envelope::new(Transaction {
        source_account: server_key,
        fee: BASE_FEE,
        seq_num: random_sequence(),
        time_bounds: Some(TimeBounds::starting_at(now, expires_in)),
        memo: Memo::authentication(),
        operations: vec![operation],
    });

    codec::sign(&mut envelope, server, network)?;

    Ok(envelope)
}

/// Issues signed challenges on behalf of a server.
#[derive(Debug, Clone)]
pub struct ChallengeIssuer<C: TimeSource = SystemTimeSource> {
    network: Network,
    default_expires_in: u64,
    clock: C,
}

impl ChallengeIssuer {
    /// Issuer reading the system clock.
    pub fn new(config: &AuthConfig) -> Self {
        Self::with_time_source(config, SystemTimeSource)
    }
}

impl<C: TimeSource> ChallengeIssuer<C> {
    /// Issuer reading time from `clock`.
    pub fn with_time_source(config: &AuthConfig, clock: C) -> Self {
        Self {
            network: config.network.clone(),
            default_expires_in: config.challenge_expires_in,
            clock,
        }
    }

    /// Issue a challenge with the configured lifetime.
    pub fn issue(&self, server: &KeyPair) -> Result<String, AuthError> {
        self.issue_expiring_in(server, self.default_expires_in)
    }

    /// Issue a challenge valid for `expires_in` seconds from now.
    ///
    /// `0` means the configured lifetime; a zero-length window is never issued.
    pub fn issue_expiring_in(&self, server: &KeyPair, expires_in: u64) -> Result<String, AuthError> {
        let expires_in = match expires_in {
            0 => self.default_expires_in,
            secs => secs,
        };

        let envelope = build_challenge(server, expires_in, &self.network, self.clock.now())?;
        codec::encode(&envelope)
    }
}
