//! buenzli node client library.
//!
//! Provides a blocking HTTP client for the ledger node's JSON interface and
//! the [`NodeApi`] trait the wallet core is written against.
//!
//! # Example
//!
//! ```ignore
//! use buenzli_rpc::{NodeApi, NodeClient};
//!
//! let node = NodeClient::new("localhost:8080").unwrap();
//! for utxo in node.unspent_outputs().unwrap() {
//!     println!("{}:{} = {}", utxo.output_hash, utxo.output_index, utxo.amount());
//! }
//! ```

pub mod client;
pub mod error;

pub use client::{NodeApi, NodeClient, RpcConfig};
pub use error::RpcError;
