//! buenzli wallet core.
//!
//! Provides the flat-file wallet record store, P-256 key management, the
//! key protection seam, and the high-level client that ties the store, the
//! node, and the transaction pipeline together.

pub mod client;
pub mod config;
pub mod error;
pub mod keys;
pub mod keystore;
pub mod protector;
pub mod store;

pub use client::WalletClient;
pub use config::ClientConfig;
pub use error::WalletError;
pub use keys::KeyPair;
pub use keystore::Keystore;
pub use protector::{KeyProtector, PlaintextProtector};
pub use store::{Wallet, WalletStore};
