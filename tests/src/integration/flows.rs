//! # Integration Test Flows
//!
//! Tests the three legs of the protocol end to end through
//! `AuthenticationService`, with the clock driven manually.
//!
//! ## Flow Tested:
//!
//! 1. **Issue**: server signs a time-bounded challenge
//! 2. **Countersign**: user checks the server signature and adds its own
//! 3. **Validate**: server checks both signatures and the window, then
//!    derives the session token
//! 4. **Resolve**: the token's bound identity is looked up on the ledger

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use mobius_auth::{
        codec, AccountSnapshot, AuthError, AuthenticationApi, ChallengeCountersigner,
        ChallengeIssuer, LedgerError, LedgerGateway, Network, TokenValidator,
    };
    use shared_crypto::PublicKey;

    use crate::integration::{Scenario, START};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Ledger gateway with a fixed set of accounts.
    struct StaticLedger {
        accounts: HashMap<PublicKey, AccountSnapshot>,
    }

    impl StaticLedger {
        fn with(accounts: &[PublicKey]) -> Self {
            Self {
                accounts: accounts
                    .iter()
                    .map(|id| {
                        let snapshot = AccountSnapshot {
                            account_id: *id,
                            sequence: 1,
                            signers: vec![*id],
                        };
                        (*id, snapshot)
                    })
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl LedgerGateway for StaticLedger {
        async fn load_account(&self, account: &PublicKey) -> Result<AccountSnapshot, LedgerError> {
            self.accounts
                .get(account)
                .cloned()
                .ok_or_else(|| LedgerError::AccountNotFound(account.account_id()))
        }
    }

    // =============================================================================
    // INTEGRATION TESTS: ISSUE → COUNTERSIGN → VALIDATE
    // =============================================================================

    /// Test the full round trip with a short-lived challenge
    #[test]
    fn test_end_to_end_with_strict_expiry() {
        let s = Scenario::new();

        let challenge = s.service.issue_challenge(&s.server, Some(100)).unwrap();
        let signed = s
            .service
            .countersign_challenge(&s.user, &challenge, &s.server.public_key())
            .unwrap();

        assert!(s
            .service
            .validate_challenge(&s.server, &signed, &s.user.public_key(), true)
            .is_ok());

        s.clock.advance(11);

        assert_eq!(
            s.service
                .validate_challenge(&s.server, &signed, &s.user.public_key(), true),
            Err(AuthError::ChallengeExpired)
        );
        assert!(s
            .service
            .validate_challenge(&s.server, &signed, &s.user.public_key(), false)
            .is_ok());

        s.clock.advance(90);

        assert_eq!(
            s.service
                .validate_challenge(&s.server, &signed, &s.user.public_key(), false),
            Err(AuthError::ChallengeExpired)
        );
    }

    /// Test that the window covers exactly [issue, issue + expires_in]
    #[test]
    fn test_issued_window() {
        let s = Scenario::new();

        let challenge = s.service.issue_challenge(&s.server, None).unwrap();
        let bounds = codec::decode(&challenge).unwrap().tx.time_bounds.unwrap();

        assert_eq!(bounds.min_time, START);
        assert_eq!(bounds.max_time, START + 86_400);
    }

    /// Test that the token is stable across repeated validation
    #[test]
    fn test_token_hash_deterministic() {
        let s = Scenario::new();

        let challenge = s.service.issue_challenge(&s.server, None).unwrap();
        let signed = s
            .service
            .countersign_challenge(&s.user, &challenge, &s.server.public_key())
            .unwrap();

        let first = s
            .service
            .token_hash(&s.server, &signed, &s.user.public_key())
            .unwrap();
        let second = s
            .service
            .token_hash(&s.server, &signed, &s.user.public_key())
            .unwrap();
        let token = s
            .service
            .token(&s.server, &signed, &s.user.public_key())
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(token.hash, first);
        assert_eq!(token.bound_identity, s.user.public_key());
        assert!(token.is_valid);
    }

    /// Test that distinct challenges yield distinct tokens
    #[test]
    fn test_distinct_challenges_distinct_tokens() {
        let s = Scenario::new();

        let hashes: Vec<String> = (0..2)
            .map(|_| {
                let challenge = s.service.issue_challenge(&s.server, None).unwrap();
                let signed = s
                    .service
                    .countersign_challenge(&s.user, &challenge, &s.server.public_key())
                    .unwrap();
                s.service
                    .token_hash(&s.server, &signed, &s.user.public_key())
                    .unwrap()
            })
            .collect();

        assert_ne!(hashes[0], hashes[1]);
    }

    /// Test that the standalone components interoperate with the service
    #[test]
    fn test_components_match_service() {
        let s = Scenario::new();
        let config = s.service.config().clone();

        let challenge = ChallengeIssuer::with_time_source(&config, s.clock.clone())
            .issue(&s.server)
            .unwrap();
        let signed = ChallengeCountersigner::new(config.network.clone())
            .countersign(&s.user, &challenge, &s.server.public_key())
            .unwrap();
        let validator = TokenValidator::with_time_source(
            &s.server,
            &signed,
            s.user.public_key(),
            &config,
            s.clock.clone(),
        )
        .unwrap();

        assert!(validator.signed_correctly());
        assert_eq!(
            validator.hash().unwrap(),
            s.service
                .token_hash(&s.server, &signed, &s.user.public_key())
                .unwrap()
        );
    }

    /// Test that a custom network still completes the flow
    #[test]
    fn test_custom_network_round_trip() {
        let config = mobius_auth::AuthConfig::for_network(Network::new("Mobius Private ; 2024"));
        let s = Scenario::with_config(config);

        let challenge = s.service.issue_challenge(&s.server, None).unwrap();
        let signed = s
            .service
            .countersign_challenge(&s.user, &challenge, &s.server.public_key())
            .unwrap();

        assert!(s
            .service
            .token(&s.server, &signed, &s.user.public_key())
            .is_ok());
    }

    // =============================================================================
    // INTEGRATION TESTS: TOKEN → LEDGER
    // =============================================================================

    /// Test that a validated token resolves to the user's account
    #[tokio::test]
    async fn test_token_resolves_account() {
        let s = Scenario::new();
        let ledger = StaticLedger::with(&[s.user.public_key()]);

        let challenge = s.service.issue_challenge(&s.server, None).unwrap();
        let signed = s
            .service
            .countersign_challenge(&s.user, &challenge, &s.server.public_key())
            .unwrap();
        let token = s
            .service
            .token(&s.server, &signed, &s.user.public_key())
            .unwrap();

        let account = s.service.resolve_account(&token, &ledger).await.unwrap();

        assert_eq!(account.account_id, s.user.public_key());
    }

    /// Test that an unknown account surfaces as a ledger error
    #[tokio::test]
    async fn test_token_for_unfunded_account() {
        let s = Scenario::new();
        let ledger = StaticLedger::with(&[]);

        let challenge = s.service.issue_challenge(&s.server, None).unwrap();
        let signed = s
            .service
            .countersign_challenge(&s.user, &challenge, &s.server.public_key())
            .unwrap();
        let token = s
            .service
            .token(&s.server, &signed, &s.user.public_key())
            .unwrap();

        let result = s.service.resolve_account(&token, &ledger).await;

        assert!(matches!(result, Err(AuthError::Ledger(reason)) if reason.contains(&s.user.public_key().account_id())));
    }
}
