//! High-level wallet client.
//!
//! Ties the keystore, the node, and the transaction pipeline together:
//! balance queries, mining requests, and transfers.

use crate::config::ClientConfig;
use crate::error::WalletError;
use crate::keystore::Keystore;
use crate::protector::{KeyProtector, PlaintextProtector};
use crate::store::Wallet;
use buenzli_rpc::NodeApi;
use buenzli_tx::{build_transfer, sign_transaction, TxError};
use buenzli_types::address::validate_address;
use buenzli_types::{Transaction, UnspentOutput};
use log::{debug, info};

/// Wallet operations that need the node.
pub struct WalletClient<N, P = PlaintextProtector> {
    keystore: Keystore<P>,
    node: N,
}

impl<N: NodeApi> WalletClient<N> {
    pub fn new(config: &ClientConfig, node: N) -> Self {
        Self {
            keystore: Keystore::new(config),
            node,
        }
    }
}

impl<N: NodeApi, P: KeyProtector> WalletClient<N, P> {
    pub fn with_keystore(keystore: Keystore<P>, node: N) -> Self {
        Self { keystore, node }
    }

    pub fn keystore(&self) -> &Keystore<P> {
        &self.keystore
    }

    /// The node's unspent outputs paying `wallet`, in node order.
    pub fn unspent_outputs(&self, wallet: &Wallet) -> Result<Vec<UnspentOutput>, WalletError> {
        let all = self.node.unspent_outputs()?;
        let total = all.len();
        let owned: Vec<_> = all
            .into_iter()
            .filter(|utxo| utxo.is_owned_by(&wallet.address))
            .collect();
        debug!(
            "{} of {} unspent outputs belong to '{}'",
            owned.len(),
            total,
            wallet.name
        );
        Ok(owned)
    }

    /// Sum of the unspent outputs paying the wallet named `name`.
    pub fn balance(&self, name: &str) -> Result<u64, WalletError> {
        let wallet = self.keystore.wallet(name)?;
        self.unspent_outputs(&wallet)?
            .iter()
            .try_fold(0u64, |acc, utxo| acc.checked_add(utxo.amount()))
            .ok_or(WalletError::Tx(TxError::AmountOverflow))
    }

    /// Ask the node to mine a block paying the wallet named `name`.
    pub fn mine_into(&self, name: &str) -> Result<(), WalletError> {
        let wallet = self.keystore.wallet(name)?;
        self.node.request_block(&wallet.address)?;
        info!("requested block for wallet '{}'", name);
        Ok(())
    }

    /// Build and sign a transfer without submitting it.
    pub fn prepare_transfer(
        &self,
        from: &str,
        to: &str,
        amount: u64,
    ) -> Result<Transaction, WalletError> {
        let wallet = self.keystore.wallet(from)?;
        if amount == 0 {
            return Err(WalletError::InvalidAmount);
        }
        validate_address(to)?;

        let unspent = self.unspent_outputs(&wallet)?;
        let mut tx = build_transfer(&unspent, amount, to, &wallet.address)?;

        let key = self.keystore.load_key(&wallet)?;
        sign_transaction(&mut tx, &key.signing_key())?;
        Ok(tx)
    }

    /// Build, sign, and submit a transfer. Returns what was submitted.
    pub fn transfer(&self, from: &str, to: &str, amount: u64) -> Result<Transaction, WalletError> {
        let tx = self.prepare_transfer(from, to, amount)?;
        self.node.submit_transaction(&tx)?;
        info!(
            "submitted transaction {} sending {} from '{}'",
            tx.hash, amount, from
        );
        Ok(tx)
    }
}
