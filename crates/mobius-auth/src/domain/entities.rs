//! # Domain Entities
//!
//! The challenge envelope is shaped like a ledger transaction so that wallets
//! can sign it with the keys they already hold, but it is built so that it
//! can never be submitted as one: its single payment is sourced from an
//! ephemeral account that never exists on the ledger.
//!
//! Fields are public because these are data transfer objects. Constructing
//! an [`Envelope`] proves nothing; trust comes only from
//! [`crate::domain::verifier::verify`].

use serde::{Deserialize, Serialize};
use shared_crypto::{PublicKey, Signature};

/// Memo text carried by every challenge.
pub const AUTH_MEMO: &str = "Mobius authentication";

/// Maximum memo text length in bytes.
pub const MAX_MEMO_TEXT_LEN: usize = 28;

/// Fee charged per operation, in base units.
pub const BASE_FEE: u32 = 100;

/// Challenge payment amount in base units (0.000001 of the native asset).
pub const CHALLENGE_PAYMENT_AMOUNT: i64 = 10;

/// Upper end of the sequence nonce range.
pub const SEQUENCE_CEILING: i64 = 99_999_999;

/// Width of the sequence nonce range below [`SEQUENCE_CEILING`].
pub const SEQUENCE_SPREAD: i64 = 65_536;

// =============================================================================
// Time Bounds
// =============================================================================

/// Validity window in unix seconds, `min_time <= max_time`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeBounds {
    /// Not valid before this instant (`notBefore`).
    pub min_time: u64,
    /// Not valid after this instant (`notAfter`).
    pub max_time: u64,
}

impl TimeBounds {
    /// Window starting at `now` and lasting `expires_in` seconds.
    pub fn starting_at(now: u64, expires_in: u64) -> Self {
        Self {
            min_time: now,
            max_time: now.saturating_add(expires_in),
        }
    }

    /// True if `min_time <= now <= max_time`.
    pub fn covers(&self, now: u64) -> bool {
        self.min_time <= now && now <= self.max_time
    }

    /// Window length in seconds.
    pub fn duration(&self) -> u64 {
        self.max_time.saturating_sub(self.min_time)
    }
}

// =============================================================================
// Memo / Asset / Operation
// =============================================================================

/// Transaction memo. Text is the only kind this protocol produces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Memo {
    /// UTF-8 text, at most [`MAX_MEMO_TEXT_LEN`] bytes.
    Text(String),
}

impl Memo {
    /// The fixed authentication memo.
    pub fn authentication() -> Self {
        Self::Text(AUTH_MEMO.to_owned())
    }

    /// Memo text.
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text(text) => text,
        }
    }
}

/// Asset moved by a payment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Asset {
    /// The ledger's native asset.
    Native,
}

/// Payment operation body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOp {
    /// Receiving account.
    pub destination: PublicKey,
    /// Asset being paid.
    pub asset: Asset,
    /// Amount in base units.
    pub amount: i64,
}

/// Operation kinds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationBody {
    /// Send an amount of an asset to a destination.
    Payment(PaymentOp),
}

/// A single ledger operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Account the operation acts on behalf of; the transaction source if `None`.
    pub source_account: Option<PublicKey>,
    /// What the operation does.
    pub body: OperationBody,
}

impl Operation {
    /// Payment of `amount` native units from `source` to `destination`.
    pub fn native_payment(source: PublicKey, destination: PublicKey, amount: i64) -> Self {
        Self {
            source_account: Some(source),
            body: OperationBody::Payment(PaymentOp {
                destination,
                asset: Asset::Native,
                amount,
            }),
        }
    }
}

// =============================================================================
// Transaction / Envelope
// =============================================================================

/// Signature-independent envelope content. This is what gets hashed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Declared issuer.
    pub source_account: PublicKey,
    /// Total fee in base units.
    pub fee: u32,
    /// Sequence number; a nonce for challenges.
    pub seq_num: i64,
    /// Validity window.
    pub time_bounds: Option<TimeBounds>,
    /// Human-readable memo.
    pub memo: Memo,
    /// Operations, exactly one for challenges.
    pub operations: Vec<Operation>,
}

/// A signature together with the hint of the key that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoratedSignature {
    /// Last four bytes of the signer's public key. Not trusted.
    pub hint: [u8; 4],
    /// Signature over the envelope hash.
    pub signature: Signature,
}

/// Transaction plus the ordered, append-only list of signatures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Signed content.
    pub tx: Transaction,
    /// Signatures in the order they were added.
    pub signatures: Vec<DecoratedSignature>,
}

impl Envelope {
    /// Unsigned envelope around `tx`.
    pub fn new(tx: Transaction) -> Self {
        Self {
            tx,
            signatures: Vec::new(),
        }
    }

    /// Source of the single challenge operation.
    ///
    /// `None` unless the envelope carries exactly one operation with an
    /// explicit source.
    pub fn operation_source(&self) -> Option<&PublicKey> {
        match self.tx.operations.as_slice() {
            [operation] => operation.source_account.as_ref(),
            _ => None,
        }
    }

    /// Structural rules every encoded envelope obeys.
    pub(crate) fn check_structure(&self) -> Result<(), &'static str> {
        let [operation] = self.tx.operations.as_slice() else {
            return Err("expected exactly one operation");
        };

        match operation.source_account {
            None => return Err("operation source missing"),
            Some(source) if source == self.tx.source_account => {
                return Err("operation sourced from envelope source")
            }
            Some(_) => {}
        }

        let Memo::Text(text) = &self.tx.memo;
        if text.len() > MAX_MEMO_TEXT_LEN {
            return Err("memo text too long");
        }

        if let Some(bounds) = self.tx.time_bounds {
            if bounds.min_time > bounds.max_time {
                return Err("time bounds inverted");
            }
        }

        Ok(())
    }
}

// =============================================================================
// Token
// =============================================================================

/// Session token derived from a validated envelope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Token {
    /// The user the token was issued to.
    #[serde(serialize_with = "serialize_account_id")]
    pub bound_identity: PublicKey,
    /// Hex-encoded envelope hash.
    pub hash: String,
    /// Whether the envelope passed validation.
    pub is_valid: bool,
}

fn serialize_account_id<S: serde::Serializer>(
    key: &PublicKey,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&key.account_id())
}
