//! # Domain Layer
//!
//! Pure protocol logic with no I/O dependencies.
//! This is the inner layer of the hexagonal architecture.
//!
//! ```text
//! ChallengeIssuer ──challenge──→ ChallengeCountersigner ──signed──→ TokenValidator
//!        │                               │                               │
//!        └──────────── codec ────────────┴──────── verifier ─────────────┘
//! ```

pub mod challenge;
pub mod codec;
pub mod countersign;
pub mod entities;
pub mod errors;
pub mod token;
pub mod verifier;
