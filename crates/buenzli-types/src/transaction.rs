//! Transaction wire structures.
//!
//! These mirror the JSON the ledger node speaks on `/transactions` and
//! `/transactions/unspent`. Field names are the node's; ordering of the
//! `inputs` and `outputs` vectors is significant for the canonical hash.

use serde::{Deserialize, Serialize};

/// Transaction kind tag. The node only knows standard transfers from clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    #[default]
    Standard,
}

/// Reference to a previous output being spent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInput {
    /// Hash of the transaction that created the output.
    pub output_hash: String,
    /// Position of the output within that transaction.
    pub output_index: u64,
    /// Hex DER signature over the transaction hash; empty until signed.
    #[serde(default)]
    pub signature: String,
}

impl TxInput {
    /// An unsigned input spending `output_index` of `output_hash`.
    pub fn unsigned(output_hash: impl Into<String>, output_index: u64) -> Self {
        Self {
            output_hash: output_hash.into(),
            output_index,
            signature: String::new(),
        }
    }

    pub fn is_signed(&self) -> bool {
        !self.signature.is_empty()
    }
}

/// Amount paid to an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    pub amount: u64,
    pub address: String,
}

impl TxOutput {
    pub fn new(amount: u64, address: impl Into<String>) -> Self {
        Self {
            amount,
            address: address.into(),
        }
    }
}

/// An unspent output as reported by the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnspentOutput {
    pub output_hash: String,
    pub output_index: u64,
    pub output: TxOutput,
}

impl UnspentOutput {
    pub fn amount(&self) -> u64 {
        self.output.amount
    }

    pub fn owner(&self) -> &str {
        &self.output.address
    }

    /// Whether this output pays `address`.
    pub fn is_owned_by(&self, address: &str) -> bool {
        self.output.address == address
    }

    /// Unsigned input spending this output.
    pub fn to_input(&self) -> TxInput {
        TxInput::unsigned(self.output_hash.clone(), self.output_index)
    }
}

/// A complete transaction as submitted to the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub kind: TxKind,
    /// Sequence index expected by the node.
    pub index: u64,
    /// Lowercase hex SHA-256 of the canonical preimage.
    pub hash: String,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
}

impl Transaction {
    /// Sum of all output amounts, `None` on overflow.
    pub fn output_total(&self) -> Option<u64> {
        self.outputs
            .iter()
            .try_fold(0u64, |acc, o| acc.checked_add(o.amount))
    }

    pub fn is_signed(&self) -> bool {
        !self.inputs.is_empty() && self.inputs.iter().all(TxInput::is_signed)
    }
}
