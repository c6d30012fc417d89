//! # Mobius Console
//!
//! Runs one complete authentication round trip against an in-memory ledger.
//!
//! ## Flow
//!
//! ```text
//! server ──issue_challenge──→ user ──countersign_challenge──→ server
//!                                                               │
//!                                                        token / token_hash
//!                                                               │
//!                                                               ↓
//!                                                   resolve_account (ledger)
//! ```
//!
//! ## Environment
//!
//! - `MOBIUS_NETWORK` - `testnet` (default) or `public`
//! - `MOBIUS_NETWORK_PASSPHRASE` - custom network passphrase, overrides `MOBIUS_NETWORK`
//! - `MOBIUS_CHALLENGE_EXPIRES_IN` - challenge lifetime in seconds
//! - `MOBIUS_STRICT_INTERVAL` - strict validation window in seconds
//! - `RUST_LOG` - log filter (default `info`)

pub mod ledger;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use mobius_auth::{AuthConfig, AuthenticationApi, AuthenticationService, Network};
use shared_crypto::KeyPair;

use crate::ledger::InMemoryLedger;

fn parse_seconds(name: &str) -> Option<u64> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(secs) => Some(secs),
        Err(_) => {
            warn!("{name} must be a whole number of seconds, ignoring {raw:?}");
            None
        }
    }
}

/// Load configuration from the environment.
fn load_config() -> AuthConfig {
    let mut config = AuthConfig::default();

    if let Ok(network) = std::env::var("MOBIUS_NETWORK") {
        match network.as_str() {
            "testnet" => config.network = Network::testnet(),
            "public" => config.network = Network::public(),
            other => warn!("MOBIUS_NETWORK must be 'testnet' or 'public', ignoring {other:?}"),
        }
    }

    if let Ok(passphrase) = std::env::var("MOBIUS_NETWORK_PASSPHRASE") {
        if passphrase.is_empty() {
            warn!("MOBIUS_NETWORK_PASSPHRASE is empty, ignoring");
        } else {
            config.network = Network::new(passphrase);
            info!("Loaded network passphrase from environment");
        }
    }

    if let Some(secs) = parse_seconds("MOBIUS_CHALLENGE_EXPIRES_IN") {
        config.challenge_expires_in = secs;
    }
    if let Some(secs) = parse_seconds("MOBIUS_STRICT_INTERVAL") {
        config.strict_interval = secs;
    }

    config
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load configuration
    let config = load_config();
    info!(
        public = config.network.is_public(),
        expires_in = config.challenge_expires_in,
        strict_interval = config.strict_interval,
        "Configuration loaded"
    );

    let service = AuthenticationService::new(config).context("invalid configuration")?;

    let server = KeyPair::generate();
    let user = KeyPair::generate();
    info!(server = %server.public_key(), user = %user.public_key(), "Generated identities");

    let ledger = InMemoryLedger::default();
    ledger
        .open_account(user.public_key(), 1)
        .context("failed to open user account")?;

    // Leg 1: server issues
    let challenge = service
        .issue_challenge(&server, None)
        .context("failed to issue challenge")?;
    info!(bytes = challenge.len(), "Challenge issued");

    // Leg 2: user countersigns
    let signed = service
        .countersign_challenge(&user, &challenge, &server.public_key())
        .context("failed to countersign challenge")?;
    info!("Challenge countersigned");

    // Leg 3: server validates
    let token = service
        .token(&server, &signed, &user.public_key())
        .context("challenge rejected")?;
    info!(hash = %token.hash, "Session token derived");

    let account = service
        .resolve_account(&token, &ledger)
        .await
        .context("failed to resolve account")?;
    info!(account = %account.account_id, sequence = account.sequence, "Account resolved");

    println!(
        "{}",
        serde_json::to_string_pretty(&token).context("failed to serialize token")?
    );

    Ok(())
}
