//! # Shared Crypto - Identity Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `signatures` | Ed25519 | Signing and verification identities |
//! | `strkey` | base32 + CRC-16/XMODEM | `G…` account ids, `S…` secret seeds |
//! | `hashing` | SHA-256 | Envelope hashes, network ids, checksums |
//!
//! ## Security Properties
//!
//! - **Ed25519**: Deterministic nonces, no RNG dependency when signing
//! - **StrKey**: Distinct version bytes, so seeds and account ids never mix
//! - **Secrets**: Zeroized on drop, excluded from `Debug`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod signatures;
pub mod strkey;

// Re-exports
pub use errors::CryptoError;
pub use hashing::{sha256, sha256_many, Hash};
pub use signatures::{KeyPair, PublicKey, Signature};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
