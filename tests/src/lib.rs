//! # Mobius-Auth Test Suite
//!
//! Unified test crate driving the public API of `mobius-auth` the way an
//! application would.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Cross-crate flows
//!     ├── flows.rs      # Happy path, expiry, token derivation, ledger lookup
//!     └── tampering.rs  # Forged, altered, and misrouted envelopes
//!
//! tests/benches/
//! └── auth_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p mobius-tests
//!
//! # By category
//! cargo test -p mobius-tests integration::flows
//! cargo test -p mobius-tests integration::tampering
//!
//! # Benchmarks
//! cargo bench -p mobius-tests
//! ```

pub mod integration;
