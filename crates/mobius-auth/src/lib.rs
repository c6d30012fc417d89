//! # Mobius Challenge-Response Authentication
//!
//! Proves control of a ledger identity without submitting anything to the
//! ledger. A server issues a signed, time-bounded challenge envelope; the
//! user countersigns it; the server checks both signatures and the window,
//! then derives a session token from the envelope hash.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Envelope model, codec, and the three protocol legs, no I/O
//! - **Ports Layer** (`ports/`): Trait definitions for inbound/outbound interfaces
//! - **Service Layer** (`service.rs`): Wires domain logic to ports
//! - **Configuration** (`config.rs`): Network selection and time limits
//!
//! ## Security Notes
//!
//! - **Network Binding**: Every signature covers the network id, so an
//!   envelope signed for one network never verifies on another
//! - **Unsubmittable Challenges**: The challenge operation is sourced from a
//!   throwaway key, so a co-signed challenge can never move funds
//! - **Hints Are Not Trusted**: Signature hints never decide verification

pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use config::{AuthConfig, ConfigError, Network};
pub use domain::challenge::ChallengeIssuer;
pub use domain::codec;
pub use domain::countersign::ChallengeCountersigner;
pub use domain::entities::{
    Asset, DecoratedSignature, Envelope, Memo, Operation, OperationBody, PaymentOp, TimeBounds,
    Token, Transaction,
};
pub use domain::errors::AuthError;
pub use domain::token::TokenValidator;
pub use domain::verifier;
pub use ports::inbound::AuthenticationApi;
pub use ports::outbound::{
    AccountSnapshot, LedgerError, LedgerGateway, SystemTimeSource, TimeSource,
};
pub use service::AuthenticationService;
pub use shared_crypto::{KeyPair, PublicKey, Signature};
