//! # Authentication Service
//!
//! Application service layer that implements the `AuthenticationApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`AuthenticationApi`)
//! - Reads time through the outbound `TimeSource` port
//! - Hands validated tokens to the outbound `LedgerGateway` on request
//! - Delegates protocol logic to the domain layer

use shared_crypto::{KeyPair, PublicKey};
use tracing::{debug, warn};

use crate::config::{AuthConfig, ConfigError};
use crate::domain::challenge::ChallengeIssuer;
use crate::domain::countersign::ChallengeCountersigner;
use crate::domain::entities::Token;
use crate::domain::errors::AuthError;
use crate::domain::token::TokenValidator;
use crate::ports::inbound::AuthenticationApi;
use crate::ports::outbound::{AccountSnapshot, LedgerGateway, SystemTimeSource, TimeSource};

/// Authentication Service.
///
/// Holds the configuration and clock shared by every leg of the protocol.
/// Keeps no per-call state, so one instance can serve concurrent callers.
pub struct AuthenticationService<C: TimeSource = SystemTimeSource> {
    config: AuthConfig,
    clock: C,
}

impl AuthenticationService {
    /// Service reading the system clock.
    pub fn new(config: AuthConfig) -> Result<Self, ConfigError> {
        Self::with_time_source(config, SystemTimeSource)
    }
}

impl<C: TimeSource> AuthenticationService<C> {
    /// Service reading time from `clock`.
    ///
    /// # Errors
    ///
    /// Any `ConfigError` from [`AuthConfig::validate`].
    pub fn with_time_source(config: AuthConfig, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, clock })
    }

    /// The active configuration.
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    fn validator(
        &self,
        server: &KeyPair,
        signed_challenge: &str,
        user: &PublicKey,
    ) -> Result<TokenValidator<&C>, AuthError> {
        TokenValidator::with_time_source(server, signed_challenge, *user, &self.config, &self.clock)
    }

    /// Look up the account a validated token is bound to.
    ///
    /// # Errors
    ///
    /// - `InvalidSignature` if the token is not marked valid
    /// - `Ledger` if the gateway fails
    pub async fn resolve_account<G: LedgerGateway>(
        &self,
        token: &Token,
        gateway: &G,
    ) -> Result<AccountSnapshot, AuthError> {
        if !token.is_valid {
            return Err(AuthError::InvalidSignature);
        }

        gateway
            .load_account(&token.bound_identity)
            .await
            .map_err(|e| {
                warn!(account = %token.bound_identity, error = %e, "Account lookup failed");
                AuthError::Ledger(e.to_string())
            })
    }
}

impl<C: TimeSource> AuthenticationApi for AuthenticationService<C> {
    fn issue_challenge(
        &self,
        server: &KeyPair,
        expires_in: Option<u64>,
    ) -> Result<String, AuthError> {
        let issuer = ChallengeIssuer::with_time_source(&self.config, &self.clock);
        let expires_in = expires_in
            .filter(|secs| *secs > 0)
            .unwrap_or(self.config.challenge_expires_in);

        let challenge = issuer.issue_expiring_in(server, expires_in)?;
        debug!(server = %server.public_key(), expires_in, "Issued challenge");

        Ok(challenge)
    }

    fn countersign_challenge(
        &self,
        user: &KeyPair,
        challenge: &str,
        expected_server: &PublicKey,
    ) -> Result<String, AuthError> {
        let countersigner = ChallengeCountersigner::new(self.config.network.clone());

        countersigner
            .countersign(user, challenge, expected_server)
            .inspect(|_| debug!(user = %user.public_key(), "Countersigned challenge"))
            .inspect_err(|e| {
                warn!(server = %expected_server, error = %e, "Refused to countersign challenge")
            })
    }

    fn validate_challenge(
        &self,
        server: &KeyPair,
        signed_challenge: &str,
        user: &PublicKey,
        strict: bool,
    ) -> Result<(), AuthError> {
        self.validator(server, signed_challenge, user)?
            .validate(strict)
            .inspect_err(|e| warn!(user = %user, strict, error = %e, "Challenge rejected"))
    }

    fn token_hash(
        &self,
        server: &KeyPair,
        signed_challenge: &str,
        user: &PublicKey,
    ) -> Result<String, AuthError> {
        self.validator(server, signed_challenge, user)?
            .hash()
            .inspect_err(|e| warn!(user = %user, error = %e, "Token derivation failed"))
    }

    fn token(
        &self,
        server: &KeyPair,
        signed_challenge: &str,
        user: &PublicKey,
    ) -> Result<Token, AuthError> {
        let token = self
            .validator(server, signed_challenge, user)?
            .token()
            .inspect_err(|e| warn!(user = %user, error = %e, "Token derivation failed"))?;

        debug!(user = %user, hash = %token.hash, "Issued session token");
        Ok(token)
    }
}

// =============================================================================
// TESTS
// =============================================================================
