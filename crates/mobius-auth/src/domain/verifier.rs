//! # Signature Verifier
//!
//! Decides whether an identity has signed an envelope. Every signature is
//! checked cryptographically against the identity's key; the hint stored
//! next to a signature is never consulted, so a forged hint cannot make a
//! signature count or stop it from counting.

use shared_crypto::PublicKey;

use super::codec;
use super::entities::Envelope;
use crate::config::Network;

/// True iff at least one signature on `envelope` verifies under `signer`.
///
/// Returns `false` for an unsigned envelope. Structural problems are a
/// decode-time concern and never reach this function.
pub fn verify(envelope: &Envelope, signer: &PublicKey, network: &Network) -> bool {
    if envelope.signatures.is_empty() {
        return false;
    }

    let Ok(digest) = codec::hash(envelope, network) else {
        return false;
    };

    envelope
        .signatures
        .iter()
        .any(|decorated| signer.verify(&digest, &decorated.signature).is_ok())
}
