//! # Envelope Codec
//!
//! Canonical text form of an [`Envelope`] and the hash every signature and
//! session token is computed over.
//!
//! ## Frame Layout
//!
//! | Field    | Size | Description                                      |
//! |----------|------|--------------------------------------------------|
//! | magic    | 4    | `"MXAE"`                                         |
//! | version  | 1    | Frame version (0x01)                             |
//! | body     | var  | bincode(envelope), fixint little-endian          |
//! | checksum | 4    | First 4 bytes of sha256(magic ‖ version ‖ body)  |
//!
//! The frame is then base64-encoded (standard alphabet, padded).
//!
//! Every accepted input has exactly one encoding, so
//! `encode(decode(s)) == s` holds byte for byte.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bincode::Options;
use shared_crypto::{sha256, sha256_many, Hash, KeyPair};

use super::entities::{DecoratedSignature, Envelope, Transaction};
use super::errors::AuthError;
use crate::config::Network;

/// Frame magic.
const FRAME_MAGIC: &[u8; 4] = b"MXAE";

/// Current frame version.
pub const FRAME_VERSION: u8 = 0x01;

const HEADER_LEN: usize = 5;
const CHECKSUM_LEN: usize = 4;

/// Upper bound on the decoded body size.
pub const MAX_ENVELOPE_BYTES: u64 = 16 * 1024;

/// Envelope type tag mixed into the signature payload.
const ENVELOPE_TYPE_TX: u32 = 2;

fn bincode_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .reject_trailing_bytes()
        .with_limit(MAX_ENVELOPE_BYTES)
}

fn checksum(header_and_body: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = sha256(header_and_body);
    [digest[0], digest[1], digest[2], digest[3]]
}

/// Serialize an envelope to its canonical text form.
///
/// # Errors
///
/// `MalformedEnvelope` if the envelope breaks a structural rule that
/// [`decode`] would reject (oversized memo, inverted time bounds, too large).
pub fn encode(envelope: &Envelope) -> Result<String, AuthError> {
    envelope.check_structure().map_err(AuthError::malformed)?;

    frame(envelope)
}

/// Frame an envelope without structural checks, to build hostile input.
#[cfg(test)]
pub(crate) fn encode_unchecked(envelope: &Envelope) -> String {
    frame(envelope).expect("envelope within size limit")
}

fn frame(envelope: &Envelope) -> Result<String, AuthError> {
    let body = bincode_options()
        .serialize(envelope)
        .map_err(|e| AuthError::malformed(format!("body encode failed: {e}")))?;

    let mut frame = Vec::with_capacity(HEADER_LEN + body.len() + CHECKSUM_LEN);
    frame.extend_from_slice(FRAME_MAGIC);
    frame.push(FRAME_VERSION);
    frame.extend_from_slice(&body);
    let sum = checksum(&frame);
    frame.extend_from_slice(&sum);

    Ok(STANDARD.encode(frame))
}

/// Parse the canonical text form.
///
/// # Errors
///
/// `MalformedEnvelope` if the text is not base64, is truncated, has the wrong
/// magic or an unknown version, fails its checksum, or the body does not
/// decode to a structurally valid envelope.
pub fn decode(text: &str) -> Result<Envelope, AuthError> {
    let frame = STANDARD
        .decode(text)
        .map_err(|e| AuthError::malformed(format!("invalid base64: {e}")))?;

    if frame.len() < HEADER_LEN + CHECKSUM_LEN {
        return Err(AuthError::malformed("truncated frame"));
    }

    if &frame[..4] != FRAME_MAGIC {
        return Err(AuthError::malformed("bad magic"));
    }

    if frame[4] != FRAME_VERSION {
        return Err(AuthError::malformed(format!(
            "unsupported version {:#04x}",
            frame[4]
        )));
    }

    let (content, sum) = frame.split_at(frame.len() - CHECKSUM_LEN);
    if checksum(content) != sum {
        return Err(AuthError::malformed("checksum mismatch"));
    }

    let envelope: Envelope = bincode_options()
        .deserialize(&content[HEADER_LEN..])
        .map_err(|e| AuthError::malformed(format!("body decode failed: {e}")))?;

    envelope.check_structure().map_err(AuthError::malformed)?;

    Ok(envelope)
}

/// Canonical bytes of the signature-independent content.
fn transaction_bytes(tx: &Transaction) -> Result<Vec<u8>, AuthError> {
    bincode_options()
        .serialize(tx)
        .map_err(|e| AuthError::malformed(format!("body encode failed: {e}")))
}

/// Hash signed by every party and used as the session token.
///
/// `sha256(network_id ‖ ENVELOPE_TYPE_TX ‖ bincode(tx))`. Signatures are not
/// part of the input, so the hash does not change as they accumulate.
pub fn hash(envelope: &Envelope, network: &Network) -> Result<Hash, AuthError> {
    let tx_bytes = transaction_bytes(&envelope.tx)?;

    Ok(sha256_many(&[
        &network.network_id(),
        &ENVELOPE_TYPE_TX.to_be_bytes(),
        &tx_bytes,
    ]))
}

/// Append `signer`'s signature over the envelope hash.
pub fn sign(envelope: &mut Envelope, signer: &KeyPair, network: &Network) -> Result<(), AuthError> {
    let digest = hash(envelope, network)?;

    envelope.signatures.push(DecoratedSignature {
        hint: signer.signature_hint(),
        signature: signer.sign(&digest),
    });

    Ok(())
}
