//! # Integration Tests
//!
//! Shared fixtures for the cross-crate flows.

pub mod flows;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use mobius_auth::{AuthConfig, AuthenticationService, TimeSource};
use shared_crypto::KeyPair;

/// Fixed start time for every scenario.
pub const START: u64 = 1_700_000_000;

/// Manually driven clock.
#[derive(Debug)]
pub struct ManualClock {
    time: AtomicU64,
}

impl ManualClock {
    /// Clock stopped at `initial`.
    pub fn new(initial: u64) -> Self {
        Self {
            time: AtomicU64::new(initial),
        }
    }

    /// Move the clock forward by `secs`.
    pub fn advance(&self, secs: u64) {
        self.time.fetch_add(secs, Ordering::SeqCst);
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> u64 {
        self.time.load(Ordering::SeqCst)
    }
}

/// A service, its clock, and the two parties.
pub struct Scenario {
    pub service: AuthenticationService<Arc<ManualClock>>,
    pub clock: Arc<ManualClock>,
    pub server: KeyPair,
    pub user: KeyPair,
}

impl Scenario {
    /// Scenario on `config` with fresh identities.
    pub fn with_config(config: AuthConfig) -> Self {
        let clock = Arc::new(ManualClock::new(START));
        let service = AuthenticationService::with_time_source(config, clock.clone())
            .expect("scenario config must be valid");

        Self {
            service,
            clock,
            server: KeyPair::generate(),
            user: KeyPair::generate(),
        }
    }

    /// Scenario on the default testnet configuration.
    pub fn new() -> Self {
        Self::with_config(AuthConfig::default())
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new()
    }
}
