//! [`ChainAdapter`] implementation shared by all supported chains.

use tx_engine::{ChainAdapter, SignError, SignInput, SignOutput, SignedTx};

use crate::address;
use crate::params::ChainParams;
use crate::tx::{self, TxInput, TxOutput, UnsignedTx};

/// Witness chains spend version-2 transactions with RBF-signaling
/// sequences; legacy chains keep the original version-1 convention.
const WITNESS_VERSION: u32 = 2;
const WITNESS_SEQUENCE: u32 = 0xFFFF_FFFD;
const LEGACY_VERSION: u32 = 1;
const LEGACY_SEQUENCE: u32 = 0xFFFF_FFFE;

/// One adapter per chain, parameterized entirely by [`ChainParams`].
pub struct UtxoChainAdapter {
    params: &'static ChainParams,
}

impl UtxoChainAdapter {
    pub const fn new(params: &'static ChainParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &'static ChainParams {
        self.params
    }
}

impl ChainAdapter for UtxoChainAdapter {
    fn name(&self) -> &'static str {
        self.params.ticker
    }

    fn is_witness(&self) -> bool {
        self.params.is_witness()
    }

    fn dust_threshold(&self) -> u64 {
        self.params.dust_threshold
    }

    fn validate_address(&self, addr: &str) -> bool {
        address::validate_address(addr, self.params)
    }

    fn sign_and_serialize(
        &self,
        inputs: &[SignInput],
        outputs: &[SignOutput],
    ) -> Result<SignedTx, SignError> {
        let witness = self.is_witness();
        let (version, sequence) = if witness {
            (WITNESS_VERSION, WITNESS_SEQUENCE)
        } else {
            (LEGACY_VERSION, LEGACY_SEQUENCE)
        };

        let mut tx_inputs = Vec::with_capacity(inputs.len());
        let mut keys = Vec::with_capacity(inputs.len());
        for input in inputs {
            let prev_txid = tx::parse_txid(&input.txid)
                .map_err(|e| SignError(format!("{}: {e}", self.params.ticker)))?;
            tx_inputs.push(TxInput {
                prev_txid,
                prev_vout: input.vout,
                value: input.value,
                pubkey: input.public_key,
                sequence,
            });
            keys.push(input.private_key);
        }

        let mut tx_outputs = Vec::with_capacity(outputs.len());
        for output in outputs {
            let script_pubkey = address::address_to_script(&output.address, self.params)
                .map_err(|e| SignError(format!("{}: {e}", self.params.ticker)))?;
            tx_outputs.push(TxOutput {
                value: output.value,
                script_pubkey,
            });
        }

        let unsigned = UnsignedTx {
            version,
            lock_time: 0,
            inputs: tx_inputs,
            outputs: tx_outputs,
        };
        let signed = tx::sign(&unsigned, &keys, witness)
            .map_err(|e| SignError(format!("{}: {e}", self.params.ticker)))?;

        Ok(SignedTx {
            hash: signed.txid,
            tx: hex::encode(signed.raw),
        })
    }
}
