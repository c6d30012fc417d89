//! # Outbound Ports (Driven Ports / SPI)
//!
//! Traits that define dependencies this crate needs: a wall clock, and the
//! ledger account service a full deployment resolves authenticated users
//! against.

use shared_crypto::PublicKey;
use std::sync::Arc;
use thiserror::Error;

// =============================================================================
// Time
// =============================================================================

/// Time source for consistent timestamp handling.
///
/// Abstracted to allow testing with deterministic time.
pub trait TimeSource: Send + Sync {
    /// Returns the current unix time in seconds.
    fn now(&self) -> u64;
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> u64 {
        (**self).now()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn now(&self) -> u64 {
        (**self).now()
    }
}

// =============================================================================
// Ledger
// =============================================================================

/// Error from ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The account does not exist on the ledger
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Communication error
    #[error("Communication error: {0}")]
    CommunicationError(String),
}

/// Remote account state, carried opaquely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSnapshot {
    /// The account's identity.
    pub account_id: PublicKey,
    /// Current ledger sequence number.
    pub sequence: i64,
    /// Keys allowed to sign for the account.
    pub signers: Vec<PublicKey>,
}

/// Gateway to the ledger account service.
///
/// Authentication never calls this itself; it is the seam through which an
/// application turns a validated token's bound identity into account state.
#[async_trait::async_trait]
pub trait LedgerGateway: Send + Sync {
    /// Load the current state of `account`.
    ///
    /// # Errors
    /// * `LedgerError::AccountNotFound` - No such account
    /// * `LedgerError::CommunicationError` - The service could not be reached
    async fn load_account(&self, account: &PublicKey) -> Result<AccountSnapshot, LedgerError>;
}

/// Mock time source for testing.
/// Clock that only moves when a test moves it.
#[cfg(test)]
#[derive(Debug)]
pub struct MockTimeSource(std::sync::atomic::AtomicU64);

#[cfg(test)]
impl MockTimeSource {
    /// Clock stopped at `start` (unix seconds).
    pub fn new(start: u64) -> Self {
        Self(start.into())
    }

    /// Move forward by `secs`.
    pub fn advance(&self, secs: u64) {
        self.0.fetch_add(secs, std::sync::atomic::Ordering::Relaxed);
    }

    /// Jump to `secs`, backwards included.
    pub fn set(&self, secs: u64) {
        self.0.store(secs, std::sync::atomic::Ordering::Relaxed);
    }
}

#[cfg(test)]
impl TimeSource for MockTimeSource {
    fn now(&self) -> u64 {
        self.0.load(std::sync::atomic::Ordering::Relaxed)
    }
}
