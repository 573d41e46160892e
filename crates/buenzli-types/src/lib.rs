//! Core types and constants for the buenzli wallet client.
//!
//! This crate provides the types shared by every other buenzli crate: the
//! JSON wire shapes exchanged with the ledger node (unspent outputs and
//! transactions), address charset rules, and protocol constants.

pub mod address;
pub mod constants;
pub mod transaction;

pub use address::AddressError;
pub use transaction::{Transaction, TxInput, TxKind, TxOutput, UnspentOutput};
