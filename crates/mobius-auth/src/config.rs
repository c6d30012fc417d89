//! # Authentication Configuration
//!
//! Everything the protocol needs to know about its surroundings is passed
//! in explicitly: which ledger network the envelopes are bound to, how long
//! a challenge lives, and how quickly a strict validation must follow
//! issuance.

use shared_crypto::{sha256, Hash};
use thiserror::Error;

/// Passphrase of the public ledger network.
pub const PUBLIC_PASSPHRASE: &str = "Public Global Stellar Network ; September 2015";

/// Passphrase of the test ledger network.
pub const TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";

/// Default challenge lifetime: one day.
pub const DEFAULT_CHALLENGE_EXPIRES_IN: u64 = 60 * 60 * 24;

/// Default strict interval in seconds.
pub const DEFAULT_STRICT_INTERVAL: u64 = 10;

/// The ledger network envelopes are bound to.
///
/// The network id is mixed into every envelope hash, so a challenge signed
/// for one network never validates on another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    passphrase: String,
}

impl Network {
    /// Network with a custom passphrase.
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: passphrase.into(),
        }
    }

    /// The public network.
    pub fn public() -> Self {
        Self::new(PUBLIC_PASSPHRASE)
    }

    /// The test network.
    pub fn testnet() -> Self {
        Self::new(TESTNET_PASSPHRASE)
    }

    /// Network passphrase.
    pub fn passphrase(&self) -> &str {
        &self.passphrase
    }

    /// `sha256(passphrase)`
    pub fn network_id(&self) -> Hash {
        sha256(self.passphrase.as_bytes())
    }

    /// True for the public network.
    pub fn is_public(&self) -> bool {
        self.passphrase == PUBLIC_PASSPHRASE
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::testnet()
    }
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A challenge that expires immediately can never be redeemed.
    #[error("challenge_expires_in must be positive")]
    ZeroExpiry,

    /// Strict validation would outlive the challenge itself.
    #[error("strict_interval ({strict_interval}s) exceeds challenge_expires_in ({expires_in}s)")]
    StrictIntervalTooLong {
        /// Configured strict interval
        strict_interval: u64,
        /// Configured challenge lifetime
        expires_in: u64,
    },

    /// The network passphrase is empty.
    #[error("network passphrase must not be empty")]
    EmptyPassphrase,
}

/// Complete authentication configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Network envelopes are bound to.
    pub network: Network,
    /// Challenge lifetime in seconds (`notAfter - notBefore`).
    pub challenge_expires_in: u64,
    /// Maximum seconds between `notBefore` and a strict validation.
    pub strict_interval: u64,
}

impl AuthConfig {
    /// Defaults bound to the given network.
    pub fn for_network(network: Network) -> Self {
        Self {
            network,
            ..Self::default()
        }
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.network.passphrase().is_empty() {
            return Err(ConfigError::EmptyPassphrase);
        }
        if self.challenge_expires_in == 0 {
            return Err(ConfigError::ZeroExpiry);
        }
        if self.strict_interval > self.challenge_expires_in {
            return Err(ConfigError::StrictIntervalTooLong {
                strict_interval: self.strict_interval,
                expires_in: self.challenge_expires_in,
            });
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            network: Network::default(),
            challenge_expires_in: DEFAULT_CHALLENGE_EXPIRES_IN,
            strict_interval: DEFAULT_STRICT_INTERVAL,
        }
    }
}
