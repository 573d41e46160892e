//! Client configuration.
//!
//! Built once by the caller (the CLI resolves flags and environment) and
//! passed by reference to the components that need it.

use crate::error::WalletError;
use buenzli_rpc::RpcConfig;
use std::path::PathBuf;

/// Where wallets live and which node to talk to.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Directory holding the record file and key files.
    pub wallet_dir: PathBuf,
    /// Node connection, if one was configured.
    pub node: Option<RpcConfig>,
}

impl ClientConfig {
    pub fn new(wallet_dir: impl Into<PathBuf>) -> Self {
        Self {
            wallet_dir: wallet_dir.into(),
            node: None,
        }
    }

    /// Set the node, given as `host:port` or a URL.
    pub fn with_node(mut self, node: &str) -> Result<Self, WalletError> {
        let rpc = RpcConfig::for_node(node).map_err(|e| WalletError::Config(e.to_string()))?;
        self.node = Some(rpc);
        Ok(self)
    }

    /// Node configuration, or a configuration error naming `hint`.
    pub fn node_config(&self, hint: &str) -> Result<&RpcConfig, WalletError> {
        self.node
            .as_ref()
            .ok_or_else(|| WalletError::Config(format!("no node configured ({})", hint)))
    }

    /// Create the wallet directory if needed.
    pub fn ensure_wallet_dir(&self) -> Result<(), WalletError> {
        std::fs::create_dir_all(&self.wallet_dir)?;
        Ok(())
    }
}
