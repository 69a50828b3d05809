//! Key management: BIP-39 mnemonics and BIP-32 derivation.
//!
//! Exposes a [`KeyRing`] per chain account that resolves signing keys on
//! demand, so derived secrets never outlive the signing call that needs
//! them.

pub mod error;
pub mod hd;
pub mod mnemonic;

pub use error::KeyError;
pub use hd::KeyRing;
