//! Address charset rules.
//!
//! An address is the unpadded base64 encoding of a public key. The node treats
//! it as an opaque string; locally it only has to survive being stored as a
//! single whitespace-free token in the wallet record file.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("address must be a non-empty string")]
    Empty,

    #[error("invalid address character {ch:?} at position {pos}")]
    InvalidCharacter { ch: char, pos: usize },
}

/// Whether `c` belongs to the standard base64 alphabet (padding included).
pub fn is_base64_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '='
}

/// Check that `address` is non-empty and drawn from the base64 alphabet.
pub fn validate_address(address: &str) -> Result<(), AddressError> {
    if address.is_empty() {
        return Err(AddressError::Empty);
    }
    match address.char_indices().find(|&(_, c)| !is_base64_char(c)) {
        Some((pos, ch)) => Err(AddressError::InvalidCharacter { ch, pos }),
        None => Ok(()),
    }
}

/// Shorten an address for display: first and last `keep` characters.
pub fn abbreviate(address: &str, keep: usize) -> String {
    if address.len() <= keep * 2 {
        return address.to_string();
    }
    format!("{}...{}", &address[..keep], &address[address.len() - keep..])
}
