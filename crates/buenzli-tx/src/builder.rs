//! Transaction builder.
//!
//! Coin selection is greedy first-fit in the order the node returned the
//! outputs: no sorting, no attempt to minimise input count or change. The
//! builder then lays out the recipient output, an optional change output, and
//! computes the canonical hash over the unsigned transaction.

use crate::sign::compute_hash;
use crate::TxError;
use buenzli_types::constants::PLACEHOLDER_SEQUENCE_INDEX;
use buenzli_types::{Transaction, TxInput, TxKind, TxOutput, UnspentOutput};
use log::debug;

/// Result of coin selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Unsigned inputs, in selection order.
    pub inputs: Vec<TxInput>,
    /// Sum of the selected outputs' amounts.
    pub total: u64,
}

impl Selection {
    /// Amount returned to the sender when paying `amount`.
    pub fn change(&self, amount: u64) -> u64 {
        self.total.saturating_sub(amount)
    }
}

/// Select outputs in iteration order until their sum covers `amount`.
///
/// Iteration stops at the first output that brings the total to `amount` or
/// above; later outputs are not pulled from the iterator.
pub fn select_first_fit<'a, I>(unspent: I, amount: u64) -> Result<Selection, TxError>
where
    I: IntoIterator<Item = &'a UnspentOutput>,
{
    if amount == 0 {
        return Err(TxError::InvalidAmount);
    }

    let mut inputs = Vec::new();
    let mut total = 0u64;

    for utxo in unspent {
        inputs.push(utxo.to_input());
        total = total
            .checked_add(utxo.amount())
            .ok_or(TxError::AmountOverflow)?;
        if total >= amount {
            debug!(
                "selected {} outputs totalling {} for {}",
                inputs.len(),
                total,
                amount
            );
            return Ok(Selection { inputs, total });
        }
    }

    Err(TxError::InsufficientFunds {
        need: amount,
        have: total,
    })
}

/// Build an unsigned transfer of `amount` to `recipient`.
///
/// Change, if any, goes back to `change_address` as a second output.
pub fn build_transfer<'a, I>(
    unspent: I,
    amount: u64,
    recipient: &str,
    change_address: &str,
) -> Result<Transaction, TxError>
where
    I: IntoIterator<Item = &'a UnspentOutput>,
{
    let selection = select_first_fit(unspent, amount)?;
    let change = selection.change(amount);

    let mut builder = TransactionBuilder::new()
        .add_inputs(selection.inputs)
        .add_output(TxOutput::new(amount, recipient));
    if change > 0 {
        builder = builder.add_output(TxOutput::new(change, change_address));
    }
    builder.build()
}

/// Builder for unsigned transactions.
pub struct TransactionBuilder {
    kind: TxKind,
    index: u64,
    inputs: Vec<TxInput>,
    outputs: Vec<TxOutput>,
}

impl TransactionBuilder {
    /// Create a new transaction builder.
    pub fn new() -> Self {
        Self {
            kind: TxKind::Standard,
            index: PLACEHOLDER_SEQUENCE_INDEX,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Add an input. Any signature it carries is kept but not hashed.
    pub fn add_input(mut self, input: TxInput) -> Self {
        self.inputs.push(input);
        self
    }

    /// Add multiple inputs.
    pub fn add_inputs(mut self, inputs: Vec<TxInput>) -> Self {
        self.inputs.extend(inputs);
        self
    }

    /// Add an output.
    pub fn add_output(mut self, output: TxOutput) -> Self {
        self.outputs.push(output);
        self
    }

    /// Assemble the transaction and compute its hash.
    pub fn build(self) -> Result<Transaction, TxError> {
        if self.inputs.is_empty() {
            return Err(TxError::NoInputs);
        }
        if self.outputs.is_empty() {
            return Err(TxError::NoOutputs);
        }
        if self.outputs.iter().any(|o| o.amount == 0) {
            return Err(TxError::InvalidAmount);
        }

        let mut tx = Transaction {
            kind: self.kind,
            index: self.index,
            hash: String::new(),
            inputs: self.inputs,
            outputs: self.outputs,
        };
        tx.output_total().ok_or(TxError::AmountOverflow)?;
        tx.hash = hex::encode(compute_hash(&tx));
        Ok(tx)
    }
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
