//! BIP-32 derivation over one chain account.

use bip32::{DerivationPath, XPrv};
use k256::ecdsa::SigningKey;
use zeroize::Zeroize;

use tx_engine::{KeyLocator, KeySource, ResolvedKey, SignError};

use crate::error::KeyError;

/// Signing-key resolver for one `m/purpose'/coin_type'/account'` subtree.
///
/// Keys are re-derived from the seed on every lookup rather than cached,
/// so a resolved secret lives exactly as long as the signing call holding
/// it. The held seed is wiped on drop.
pub struct KeyRing {
    seed: [u8; 64],
    purpose: u32,
    coin_type: u32,
    account: u32,
}

impl KeyRing {
    pub fn new(seed: [u8; 64], purpose: u32, coin_type: u32, account: u32) -> Self {
        Self {
            seed,
            purpose,
            coin_type,
            account,
        }
    }

    fn path(&self, change: u32, index: u32) -> String {
        format!(
            "m/{}'/{}'/{}'/{}/{}",
            self.purpose, self.coin_type, self.account, change, index
        )
    }

    /// Derive the key at `change/index` under this ring's account subtree.
    pub fn derive(&self, change: u32, index: u32) -> Result<ResolvedKey, KeyError> {
        let path: DerivationPath = self
            .path(change, index)
            .parse()
            .map_err(|e: bip32::Error| KeyError::DerivationFailed(e.to_string()))?;

        let xprv = XPrv::derive_from_path(&self.seed, &path)
            .map_err(|e| KeyError::DerivationFailed(e.to_string()))?;

        let mut private_key: [u8; 32] = xprv.to_bytes().into();
        let signing_key = SigningKey::from_bytes(&private_key.into()).map_err(|e| {
            private_key.zeroize();
            KeyError::DerivationFailed(e.to_string())
        })?;

        let public_key: [u8; 33] = signing_key
            .verifying_key()
            .to_sec1_bytes()
            .as_ref()
            .try_into()
            .map_err(|_| KeyError::DerivationFailed("Invalid public key length".into()))?;

        Ok(ResolvedKey {
            private_key,
            public_key,
        })
    }
}

impl KeySource for KeyRing {
    fn resolve(&self, locator: &KeyLocator) -> Result<ResolvedKey, SignError> {
        self.derive(locator.branch.child_number(), locator.index)
            .map_err(|e| SignError(e.to_string()))
    }
}

impl Drop for KeyRing {
    fn drop(&mut self) {
        self.seed.zeroize();
    }
}
