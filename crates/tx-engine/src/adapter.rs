//! Collaborator contracts: per-chain adapters and key sources.

use thiserror::Error;
use zeroize::Zeroize;

use crate::utxo::KeyLocator;

/// Fault raised by a signing/serialization collaborator.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct SignError(pub String);

/// One input handed to the signer: the outpoint being spent plus its
/// resolved signing key.
pub struct SignInput {
    /// Previous transaction id, hex, display byte order.
    pub txid: String,
    pub vout: u32,
    /// Value of the spent output in minor units (required for witness
    /// sighashes and for legacy script reconstruction).
    pub value: u64,
    /// 32-byte secp256k1 secret scalar.
    pub private_key: [u8; 32],
    /// 33-byte compressed public key.
    pub public_key: [u8; 33],
}

/// One output handed to the signer.
pub struct SignOutput {
    pub address: String,
    pub value: u64,
}

/// Signer result: canonical transaction id and raw transaction, both hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTx {
    pub hash: String,
    pub tx: String,
}

/// The sole per-chain variation point of the engine.
///
/// Selection, fee quoting, and assembly are shared code driven by these
/// few answers.
pub trait ChainAdapter {
    /// Chain tag used in error messages and logs.
    fn name(&self) -> &'static str;

    /// Whether transaction sizes use the witness weight discount.
    fn is_witness(&self) -> bool;

    /// Minimum output value worth creating.
    fn dust_threshold(&self) -> u64 {
        1_000
    }

    /// Syntactic address validation for this chain.
    fn validate_address(&self, address: &str) -> bool;

    /// Sign every input and serialize to the chain's wire format.
    fn sign_and_serialize(
        &self,
        inputs: &[SignInput],
        outputs: &[SignOutput],
    ) -> Result<SignedTx, SignError>;
}

/// A signing key resolved from a [`KeyLocator`]. Zeroizes on drop.
pub struct ResolvedKey {
    pub private_key: [u8; 32],
    pub public_key: [u8; 33],
}

impl Drop for ResolvedKey {
    fn drop(&mut self) {
        self.private_key.zeroize();
    }
}

/// Key-derivation collaborator: reconstructs signing keys on demand.
///
/// Must be deterministic (the same locator always resolves to the same
/// key) and must fail closed on an invalid locator rather than returning
/// a wrong key.
pub trait KeySource {
    fn resolve(&self, locator: &KeyLocator) -> Result<ResolvedKey, SignError>;
}
