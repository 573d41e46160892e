//! Wallet error types.

use buenzli_rpc::RpcError;
use buenzli_tx::TxError;
use buenzli_types::AddressError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("malformed wallet record on line {line}: '{content}'")]
    MalformedRecord { line: usize, content: String },

    #[error("wallet '{0}' already exists")]
    DuplicateWallet(String),

    #[error("wallet '{0}' does not exist")]
    WalletNotFound(String),

    #[error("invalid wallet name '{0}' (letters and digits only)")]
    InvalidWalletName(String),

    #[error("invalid key reference '{0}'")]
    InvalidKeyRef(String),

    #[error("invalid address: {0}")]
    InvalidAddress(#[from] AddressError),

    #[error("insufficient funds: need {need}, have {have}")]
    InsufficientFunds { need: u64, have: u64 },

    #[error("amount must be positive")]
    InvalidAmount,

    #[error("failed to decode private key: {0}")]
    KeyDecode(String),

    #[error("failed to encode key: {0}")]
    KeyEncode(String),

    #[error("private key of wallet '{0}' does not match its address")]
    KeyMismatch(String),

    #[error("network error: {0}")]
    Network(#[from] RpcError),

    #[error("transaction error: {0}")]
    Tx(TxError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<TxError> for WalletError {
    fn from(err: TxError) -> Self {
        match err {
            TxError::InsufficientFunds { need, have } => Self::InsufficientFunds { need, have },
            TxError::InvalidAmount => Self::InvalidAmount,
            other => Self::Tx(other),
        }
    }
}
