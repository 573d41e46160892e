//! Protocol and layout constants.

/// Sequence index sent with every transaction.
///
/// The node exposes no endpoint for the correct next index, so every
/// transaction carries zero.
// TODO: replace once the node grows an endpoint returning the next index.
pub const PLACEHOLDER_SEQUENCE_INDEX: u64 = 0;

/// Name of the wallet record file inside the wallet directory.
pub const WALLETS_FILE: &str = "wallets";

/// Prefix of private key file names inside the wallet directory.
pub const KEY_FILE_PREFIX: &str = "id_ecdsa_";

/// PEM label of stored private keys (SEC1).
pub const PRIVATE_KEY_PEM_LABEL: &str = "EC PRIVATE KEY";

/// Node HTTP endpoints.
pub mod endpoints {
    pub const UNSPENT_OUTPUTS: &str = "/transactions/unspent";
    pub const TRANSACTIONS: &str = "/transactions";
    pub const BLOCKS: &str = "/blocks";
}

/// Environment variables consulted by the command-line client.
pub mod env {
    pub const WALLET_DIR: &str = "BUENZLI_DIR";
    pub const NODE: &str = "BUENZLI_NODE";
}

/// Default wallet directory name under the user's home directory.
pub const DEFAULT_WALLET_DIR_NAME: &str = ".buenzli";
