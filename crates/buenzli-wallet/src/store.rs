//! Flat-file wallet record store.
//!
//! One record per line in `<wallet_dir>/wallets`:
//!
//! ```text
//! <name> <key_ref> <address>
//! ```
//!
//! `name` is alphanumeric, `key_ref` is a single token naming the key file
//! relative to the wallet directory, and `address` uses the base64 alphabet.
//! A single bad line fails the whole read.
//!
//! Two processes creating the same name concurrently can both pass the
//! duplicate check; there is no file locking around `create`.

use crate::error::WalletError;
use buenzli_types::address::{is_base64_char, validate_address};
use buenzli_types::constants::WALLETS_FILE;
use log::debug;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// A named wallet record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wallet {
    pub name: String,
    /// Key file name, relative to the wallet directory.
    pub key_ref: String,
    pub address: String,
}

impl fmt::Display for Wallet {
    /// Canonical record line, without the trailing newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.key_ref, self.address)
    }
}

/// Whether `name` is a valid wallet name.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Parse one record line. `line_no` is 1-based and only used for errors.
pub fn parse_record(line_no: usize, line: &str) -> Result<Wallet, WalletError> {
    let malformed = || WalletError::MalformedRecord {
        line: line_no,
        content: line.to_string(),
    };

    let mut tokens = line.split_whitespace();
    let (name, key_ref, address) = match (tokens.next(), tokens.next(), tokens.next(), tokens.next()) {
        (Some(name), Some(key_ref), Some(address), None) => (name, key_ref, address),
        _ => return Err(malformed()),
    };

    if !is_valid_name(name) || !address.chars().all(is_base64_char) {
        return Err(malformed());
    }

    Ok(Wallet {
        name: name.to_string(),
        key_ref: key_ref.to_string(),
        address: address.to_string(),
    })
}

/// Wallet records stored in a directory.
#[derive(Debug, Clone)]
pub struct WalletStore {
    dir: PathBuf,
    path: PathBuf,
}

impl WalletStore {
    /// Store rooted at `dir`. Nothing is touched on disk until a write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let path = dir.join(WALLETS_FILE);
        Self { dir, path }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the record file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records, in file order. A missing file is an empty store.
    pub fn list(&self) -> Result<Vec<Wallet>, WalletError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        contents
            .lines()
            .enumerate()
            .map(|(i, line)| parse_record(i + 1, line))
            .collect()
    }

    /// First record named `name`.
    pub fn find(&self, name: &str) -> Result<Option<Wallet>, WalletError> {
        Ok(self.list()?.into_iter().find(|w| w.name == name))
    }

    /// Append a new record.
    ///
    /// Everything is validated before the file is opened; the line is written
    /// with a single append.
    pub fn create(&self, name: &str, key_ref: &str, address: &str) -> Result<Wallet, WalletError> {
        if !is_valid_name(name) {
            return Err(WalletError::InvalidWalletName(name.to_string()));
        }
        if key_ref.is_empty() || key_ref.contains(char::is_whitespace) {
            return Err(WalletError::InvalidKeyRef(key_ref.to_string()));
        }
        validate_address(address)?;

        if self.find(name)?.is_some() {
            return Err(WalletError::DuplicateWallet(name.to_string()));
        }

        let wallet = Wallet {
            name: name.to_string(),
            key_ref: key_ref.to_string(),
            address: address.to_string(),
        };

        fs::create_dir_all(&self.dir)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(format!("{}\n", wallet).as_bytes())?;

        debug!("appended wallet record '{}' to {}", name, self.path.display());
        Ok(wallet)
    }

    /// Absolute path of a wallet's key file.
    pub fn key_path(&self, wallet: &Wallet) -> PathBuf {
        self.dir.join(&wallet.key_ref)
    }
}
