//! In-memory ledger adapter.
//!
//! Stands in for the remote account service so the console can resolve a
//! token's bound identity without network access.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use mobius_auth::{AccountSnapshot, LedgerError, LedgerGateway};
use shared_crypto::PublicKey;

/// Ledger gateway backed by a map of known accounts.
#[derive(Default)]
pub struct InMemoryLedger {
    accounts: RwLock<HashMap<PublicKey, AccountSnapshot>>,
}

impl InMemoryLedger {
    /// Register `account` with itself as the only signer.
    pub fn open_account(&self, account: PublicKey, sequence: i64) -> Result<(), LedgerError> {
        let snapshot = AccountSnapshot {
            account_id: account,
            sequence,
            signers: vec![account],
        };

        self.accounts
            .write()
            .map_err(|_| LedgerError::CommunicationError("ledger lock poisoned".into()))?
            .insert(account, snapshot);

        Ok(())
    }
}

#[async_trait]
impl LedgerGateway for InMemoryLedger {
    async fn load_account(&self, account: &PublicKey) -> Result<AccountSnapshot, LedgerError> {
        self.accounts
            .read()
            .map_err(|_| LedgerError::CommunicationError("ledger lock poisoned".into()))?
            .get(account)
            .cloned()
            .ok_or_else(|| LedgerError::AccountNotFound(account.account_id()))
    }
}
