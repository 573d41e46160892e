//! Private key protection.
//!
//! Key files pass through a [`KeyProtector`] on their way to and from disk.
//! Only [`PlaintextProtector`] exists: keys are stored unencrypted.

use crate::error::WalletError;

/// Transforms a PEM private key into its at-rest form and back.
pub trait KeyProtector {
    /// Bytes to write to the key file.
    fn protect(&self, pem: &str) -> Result<Vec<u8>, WalletError>;

    /// Recover the PEM text from a key file's bytes.
    fn unprotect(&self, stored: &[u8]) -> Result<String, WalletError>;
}

/// Stores keys as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextProtector;

impl KeyProtector for PlaintextProtector {
    fn protect(&self, pem: &str) -> Result<Vec<u8>, WalletError> {
        Ok(pem.as_bytes().to_vec())
    }

    fn unprotect(&self, stored: &[u8]) -> Result<String, WalletError> {
        String::from_utf8(stored.to_vec())
            .map_err(|_| WalletError::KeyDecode("key file is not valid UTF-8".into()))
    }
}

impl<T: KeyProtector + ?Sized> KeyProtector for &T {
    fn protect(&self, pem: &str) -> Result<Vec<u8>, WalletError> {
        (**self).protect(pem)
    }

    fn unprotect(&self, stored: &[u8]) -> Result<String, WalletError> {
        (**self).unprotect(stored)
    }
}
