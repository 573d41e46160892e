//! Canonical hashing and signing.
//!
//! The canonical preimage is the decimal sequence index, then for each input
//! its origin hash and decimal origin index, then for each output its decimal
//! amount and address, concatenated with no separators. Its SHA-256 digest,
//! hex encoded, is the transaction hash.
//!
//! The sender signs the raw 32-byte digest once (ECDSA P-256, RFC 6979
//! nonces, DER encoding) and the same signature is attached to every input.

use crate::TxError;
use buenzli_types::Transaction;
use log::debug;
use p256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use sha2::{Digest, Sha256};

/// Canonical hash preimage. Signatures are not part of it.
pub fn hash_preimage(tx: &Transaction) -> String {
    let mut preimage = tx.index.to_string();
    for input in &tx.inputs {
        preimage.push_str(&input.output_hash);
        preimage.push_str(&input.output_index.to_string());
    }
    for output in &tx.outputs {
        preimage.push_str(&output.amount.to_string());
        preimage.push_str(&output.address);
    }
    preimage
}

/// SHA-256 digest of the canonical preimage.
pub fn compute_hash(tx: &Transaction) -> [u8; 32] {
    Sha256::digest(hash_preimage(tx).as_bytes()).into()
}

/// Recompute the digest and make sure `tx.hash` still describes it.
fn current_digest(tx: &Transaction) -> Result<[u8; 32], TxError> {
    let digest = compute_hash(tx);
    let computed = hex::encode(digest);
    if !computed.eq_ignore_ascii_case(&tx.hash) {
        return Err(TxError::StaleHash {
            stored: tx.hash.clone(),
            computed,
        });
    }
    Ok(digest)
}

/// Sign `tx` with `key`, writing the hex DER signature into every input.
///
/// Fails with [`TxError::StaleHash`] if inputs or outputs changed after the
/// hash was computed.
pub fn sign_transaction(tx: &mut Transaction, key: &SigningKey) -> Result<(), TxError> {
    if tx.inputs.is_empty() {
        return Err(TxError::NoInputs);
    }
    let digest = current_digest(tx)?;

    let signature: Signature = key
        .sign_prehash(&digest)
        .map_err(|e| TxError::Signing(e.to_string()))?;
    let signature_hex = hex::encode(signature.to_der().as_bytes());

    for input in &mut tx.inputs {
        input.signature = signature_hex.clone();
    }
    debug!("signed transaction {} ({} inputs)", tx.hash, tx.inputs.len());
    Ok(())
}

/// Check the stored hash and every input's signature against `key`.
pub fn verify_transaction(tx: &Transaction, key: &VerifyingKey) -> Result<(), TxError> {
    if tx.inputs.is_empty() {
        return Err(TxError::NoInputs);
    }
    let digest = current_digest(tx)?;

    for (i, input) in tx.inputs.iter().enumerate() {
        let der = hex::decode(&input.signature).map_err(|_| TxError::InvalidSignature(i))?;
        let signature = Signature::from_der(&der).map_err(|_| TxError::InvalidSignature(i))?;
        key.verify_prehash(&digest, &signature)
            .map_err(|_| TxError::InvalidSignature(i))?;
    }
    Ok(())
}
