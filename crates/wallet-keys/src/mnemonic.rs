use bip39::{Language, Mnemonic};
use rand::RngCore;
use zeroize::Zeroize;

use crate::error::KeyError;

/// Generate a new 24-word BIP-39 mnemonic (256 bits of entropy).
pub fn generate_mnemonic() -> Result<String, KeyError> {
    let mut entropy = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut entropy);
    let mnemonic = Mnemonic::from_entropy_in(Language::English, &entropy)
        .map_err(|e| KeyError::InvalidMnemonic(e.to_string()))?;
    entropy.zeroize();
    Ok(mnemonic.to_string())
}

/// Validate a mnemonic phrase.
pub fn validate_mnemonic(phrase: &str) -> bool {
    Mnemonic::parse_in_normalized(Language::English, phrase).is_ok()
}

/// Derive the 64-byte seed from mnemonic + optional passphrase.
/// Caller MUST zeroize the returned seed when done.
pub fn mnemonic_to_seed(phrase: &str, passphrase: &str) -> Result<[u8; 64], KeyError> {
    let mnemonic = Mnemonic::parse_in_normalized(Language::English, phrase)
        .map_err(|e| KeyError::InvalidMnemonic(e.to_string()))?;
    Ok(mnemonic.to_seed(passphrase))
}
