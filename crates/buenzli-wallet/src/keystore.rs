//! Named wallets and their key files.

use crate::config::ClientConfig;
use crate::error::WalletError;
use crate::keys::KeyPair;
use crate::protector::{KeyProtector, PlaintextProtector};
use crate::store::{is_valid_name, Wallet, WalletStore};
use buenzli_types::constants::KEY_FILE_PREFIX;
use log::{info, warn};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Wallet record store plus the key files it references.
pub struct Keystore<P = PlaintextProtector> {
    store: WalletStore,
    protector: P,
}

impl Keystore {
    /// Keystore in `config.wallet_dir` with unencrypted key files.
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_protector(config, PlaintextProtector)
    }
}

impl<P: KeyProtector> Keystore<P> {
    pub fn with_protector(config: &ClientConfig, protector: P) -> Self {
        Self {
            store: WalletStore::new(config.wallet_dir.clone()),
            protector,
        }
    }

    pub fn store(&self) -> &WalletStore {
        &self.store
    }

    pub fn list(&self) -> Result<Vec<Wallet>, WalletError> {
        self.store.list()
    }

    /// The wallet named `name`, or [`WalletError::WalletNotFound`].
    pub fn wallet(&self, name: &str) -> Result<Wallet, WalletError> {
        self.store
            .find(name)?
            .ok_or_else(|| WalletError::WalletNotFound(name.to_string()))
    }

    /// Generate a key pair, write its key file, and record the wallet.
    pub fn create_wallet(&self, name: &str) -> Result<Wallet, WalletError> {
        if !is_valid_name(name) {
            return Err(WalletError::InvalidWalletName(name.to_string()));
        }
        if self.store.find(name)?.is_some() {
            return Err(WalletError::DuplicateWallet(name.to_string()));
        }

        let pair = KeyPair::generate();
        let address = pair.address()?;
        let stored = self.protector.protect(&pair.to_pem()?)?;

        let key_ref = format!("{}{}", KEY_FILE_PREFIX, name);
        let key_path = self.store.dir().join(&key_ref);
        fs::create_dir_all(self.store.dir())?;
        write_key_file(&key_path, &stored)?;

        let wallet = self.record_or_discard(&key_path, name, &key_ref, &address)?;
        info!("created wallet '{}'", name);
        Ok(wallet)
    }

    /// Append the record for a freshly written key file, removing the file
    /// again if the append fails.
    fn record_or_discard(
        &self,
        key_path: &Path,
        name: &str,
        key_ref: &str,
        address: &str,
    ) -> Result<Wallet, WalletError> {
        self.store.create(name, key_ref, address).map_err(|e| {
            if let Err(rm) = fs::remove_file(key_path) {
                warn!("failed to remove orphaned key file {}: {}", key_path.display(), rm);
            }
            e
        })
    }

    /// Load and check the key pair of `wallet`.
    ///
    /// Fails with [`WalletError::KeyMismatch`] if the key file does not
    /// belong to the wallet's address.
    pub fn load_key(&self, wallet: &Wallet) -> Result<KeyPair, WalletError> {
        let stored = fs::read(self.store.key_path(wallet))?;
        let pem = self.protector.unprotect(&stored)?;
        let pair = KeyPair::from_pem(&pem)?;

        if pair.address()? != wallet.address {
            return Err(WalletError::KeyMismatch(wallet.name.clone()));
        }
        Ok(pair)
    }
}

/// Write a new key file. An existing file at `path` is never overwritten.
fn write_key_file(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keystore(dir: &Path) -> Keystore {
        Keystore::new(&ClientConfig::new(dir))
    }

    #[test]
    fn test_create_wallet_writes_key_and_record() {
        let tmp = tempfile::tempdir().unwrap();
        let ks = keystore(tmp.path());
        let wallet = ks.create_wallet("alice").unwrap();

        assert_eq!(wallet.key_ref, "id_ecdsa_alice");
        let pem = fs::read_to_string(tmp.path().join("id_ecdsa_alice")).unwrap();
        assert!(pem.contains("EC PRIVATE KEY"));
        assert_eq!(ks.wallet("alice").unwrap(), wallet);

        let pair = ks.load_key(&wallet).unwrap();
        assert_eq!(pair.address().unwrap(), wallet.address);
    }

    #[cfg(unix)]
    #[test]
    fn test_key_file_is_private() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = tempfile::tempdir().unwrap();
        keystore(tmp.path()).create_wallet("alice").unwrap();
        let mode = fs::metadata(tmp.path().join("id_ecdsa_alice"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o077, 0);
    }

    #[test]
    fn test_create_duplicate_keeps_original_key() {
        let tmp = tempfile::tempdir().unwrap();
        let ks = keystore(tmp.path());
        let first = ks.create_wallet("alice").unwrap();

        assert!(matches!(
            ks.create_wallet("alice"),
            Err(WalletError::DuplicateWallet(_))
        ));
        assert_eq!(ks.list().unwrap().len(), 1);
        ks.load_key(&first).unwrap();
    }

    #[test]
    fn test_existing_key_file_is_not_overwritten() {
        let tmp = tempfile::tempdir().unwrap();
        let key_path = tmp.path().join("id_ecdsa_alice");
        fs::write(&key_path, "EXISTING KEY MATERIAL").unwrap();

        let ks = keystore(tmp.path());
        assert!(matches!(ks.create_wallet("alice"), Err(WalletError::Io(_))));
        assert_eq!(fs::read_to_string(&key_path).unwrap(), "EXISTING KEY MATERIAL");
        assert!(ks.list().unwrap().is_empty());
    }

    #[test]
    fn test_failed_record_removes_new_key_file() {
        let tmp = tempfile::tempdir().unwrap();
        let ks = keystore(tmp.path());
        let key_path = tmp.path().join("id_ecdsa_alice");
        write_key_file(&key_path, b"key").unwrap();

        let result = ks.record_or_discard(&key_path, "alice", "id_ecdsa_alice", "not base64!");
        assert!(matches!(result, Err(WalletError::InvalidAddress(_))));
        assert!(!key_path.exists());
        assert!(ks.list().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_name() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            keystore(tmp.path()).create_wallet("../etc"),
            Err(WalletError::InvalidWalletName(_))
        ));
    }

    #[test]
    fn test_unknown_wallet() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            keystore(tmp.path()).wallet("ghost"),
            Err(WalletError::WalletNotFound(ref n)) if n == "ghost"
        ));
    }

    #[test]
    fn test_corrupt_key_file() {
        let tmp = tempfile::tempdir().unwrap();
        let ks = keystore(tmp.path());
        let wallet = ks.create_wallet("alice").unwrap();
        fs::write(ks.store().key_path(&wallet), "garbage").unwrap();
        assert!(matches!(ks.load_key(&wallet), Err(WalletError::KeyDecode(_))));
    }

    #[test]
    fn test_swapped_key_file() {
        let tmp = tempfile::tempdir().unwrap();
        let ks = keystore(tmp.path());
        let alice = ks.create_wallet("alice").unwrap();
        let bob = ks.create_wallet("bob").unwrap();
        fs::copy(ks.store().key_path(&bob), ks.store().key_path(&alice)).unwrap();
        assert!(matches!(ks.load_key(&alice), Err(WalletError::KeyMismatch(_))));
    }
}
