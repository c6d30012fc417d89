//! # StrKey Text Encoding
//!
//! Human-typable forms of 32-byte key material.
//!
//! ```text
//! base32( version || payload (32) || crc16_xmodem(version || payload) as u16 LE )
//! ```
//!
//! The version byte decides the leading character: account ids render as
//! `G…`, secret seeds as `S…`. Each kind carries its own version byte so a
//! seed can never be decoded as an account id or the other way round.

use crate::CryptoError;

/// Version byte for an Ed25519 account id (`G…`).
pub const VERSION_ACCOUNT_ID: u8 = 6 << 3;

/// Version byte for an Ed25519 secret seed (`S…`).
pub const VERSION_SEED: u8 = 18 << 3;

/// RFC 4648 base32 alphabet.
const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// version (1) + payload (32) + checksum (2)
const RAW_LEN: usize = 35;

/// 35 bytes = 280 bits = 56 base32 characters, no padding needed.
const TEXT_LEN: usize = 56;

/// Encode a 32-byte payload under the given version byte.
pub fn encode(version: u8, payload: &[u8; 32]) -> String {
    let mut raw = [0u8; RAW_LEN];
    raw[0] = version;
    raw[1..33].copy_from_slice(payload);
    let crc = crc16_xmodem(&raw[..33]);
    raw[33..].copy_from_slice(&crc.to_le_bytes());

    base32_encode(&raw)
}

/// Decode text produced by [`encode`], insisting on `version`.
///
/// # Errors
///
/// - `InvalidStrKey` if the text has the wrong length, leaves the alphabet
///   or fails the checksum
/// - `StrKeyVersionMismatch` if the text is a valid StrKey of another kind
pub fn decode(version: u8, text: &str) -> Result<[u8; 32], CryptoError> {
    if text.len() != TEXT_LEN {
        return Err(CryptoError::InvalidStrKey("wrong length"));
    }

    let raw = base32_decode(text.as_bytes())?;

    let expected_crc = crc16_xmodem(&raw[..33]);
    let actual_crc = u16::from_le_bytes([raw[33], raw[34]]);
    if expected_crc != actual_crc {
        return Err(CryptoError::InvalidStrKey("checksum mismatch"));
    }

    if raw[0] != version {
        return Err(CryptoError::StrKeyVersionMismatch {
            expected: version,
            actual: raw[0],
        });
    }

    let mut payload = [0u8; 32];
    payload.copy_from_slice(&raw[1..33]);
    Ok(payload)
}

/// CRC-16/XMODEM (poly 0x1021, init 0).
fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= u16::from(byte) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}

fn base32_encode(raw: &[u8; RAW_LEN]) -> String {
    let mut out = String::with_capacity(TEXT_LEN);
    let mut buffer: u16 = 0;
    let mut bits = 0u32;

    for &byte in raw {
        buffer = (buffer << 8) | u16::from(byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            let index = ((buffer >> bits) & 0x1F) as usize;
            out.push(ALPHABET[index] as char);
        }
    }
    // 280 bits is a multiple of 5, nothing left over
    debug_assert_eq!(bits, 0);

    out
}

fn base32_decode(text: &[u8]) -> Result<[u8; RAW_LEN], CryptoError> {
    let mut raw = [0u8; RAW_LEN];
    let mut buffer: u16 = 0;
    let mut bits = 0u32;
    let mut written = 0usize;

    for &c in text {
        let value = match c {
            b'A'..=b'Z' => c - b'A',
            b'2'..=b'7' => c - b'2' + 26,
            _ => return Err(CryptoError::InvalidStrKey("invalid character")),
        };
        buffer = (buffer << 5) | u16::from(value);
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            raw[written] = (buffer >> bits) as u8;
            written += 1;
        }
    }

    if written != RAW_LEN {
        return Err(CryptoError::InvalidStrKey("wrong length"));
    }

    Ok(raw)
}
