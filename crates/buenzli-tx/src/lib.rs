//! buenzli transaction construction, hashing, and signing.
//!
//! Provides first-fit coin selection over the node's unspent outputs, a
//! builder that assembles inputs and outputs and computes the canonical
//! transaction hash, and ECDSA P-256 signing of that hash.

pub mod builder;
pub mod sign;

pub use builder::{build_transfer, select_first_fit, Selection, TransactionBuilder};
pub use sign::{compute_hash, hash_preimage, sign_transaction, verify_transaction};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TxError {
    #[error("insufficient funds: need {need}, have {have}")]
    InsufficientFunds { need: u64, have: u64 },

    #[error("amount must be positive")]
    InvalidAmount,

    #[error("amount overflow while summing outputs")]
    AmountOverflow,

    #[error("transaction has no inputs")]
    NoInputs,

    #[error("transaction has no outputs")]
    NoOutputs,

    #[error("stale transaction hash: stored {stored}, computed {computed}")]
    StaleHash { stored: String, computed: String },

    #[error("signing error: {0}")]
    Signing(String),

    #[error("invalid signature on input {0}")]
    InvalidSignature(usize),
}
