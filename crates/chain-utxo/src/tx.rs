//! Transaction wire format, sighash computation, and signing.
//!
//! Covers the two serialization families shared by the supported chains:
//! the original P2PKH format (scriptSig spends, whole-transaction SIGHASH_ALL
//! preimage) and segwit P2WPKH (BIP-143 sighash, marker/flag framing,
//! witness stacks). The transaction id is always the double-SHA256 of the
//! witness-stripped serialization, displayed byte-reversed.

use k256::ecdsa::{signature::hazmat::PrehashSigner, Signature, SigningKey};
use sha2::{Digest, Sha256};

use crate::address::{hash160, p2pkh_script};
use crate::error::ChainError;

const SIGHASH_ALL: u32 = 0x01;

/// An unsigned transaction ready for per-input signing.
#[derive(Debug, Clone)]
pub struct UnsignedTx {
    pub version: u32,
    pub lock_time: u32,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
}

#[derive(Debug, Clone)]
pub struct TxInput {
    /// Previous transaction hash, internal (little-endian) byte order.
    pub prev_txid: [u8; 32],
    pub prev_vout: u32,
    /// Value of the spent output, needed for the BIP-143 sighash.
    pub value: u64,
    /// Compressed public key controlling the spent output.
    pub pubkey: [u8; 33],
    pub sequence: u32,
}

#[derive(Debug, Clone)]
pub struct TxOutput {
    pub value: u64,
    pub script_pubkey: Vec<u8>,
}

/// The signed artifact: full wire bytes plus the txid preimage bytes.
pub struct SignedTransaction {
    /// Serialized transaction ready for broadcast.
    pub raw: Vec<u8>,
    /// Canonical transaction id, hex, display byte order.
    pub txid: String,
}

/// Sign every input with its own key and serialize.
///
/// `keys` must align one-to-one with `tx.inputs`; each entry is the 32-byte
/// secret scalar whose public key is recorded on the input. Witness chains
/// get BIP-143 sighashes and segwit framing, legacy chains get classic
/// scriptSig spends.
pub fn sign(
    tx: &UnsignedTx,
    keys: &[[u8; 32]],
    witness: bool,
) -> Result<SignedTransaction, ChainError> {
    if keys.len() != tx.inputs.len() {
        return Err(ChainError::SigningError(format!(
            "{} keys for {} inputs",
            keys.len(),
            tx.inputs.len()
        )));
    }

    let mut unlockers: Vec<Vec<u8>> = Vec::with_capacity(tx.inputs.len());
    for (index, key) in keys.iter().enumerate() {
        let sighash = if witness {
            witness_sighash(tx, index)
        } else {
            legacy_sighash(tx, index)
        };
        let signature = ecdsa_sign(key, &sighash)?;
        unlockers.push(signature);
    }

    let raw = if witness {
        serialize_witness(tx, &unlockers)
    } else {
        serialize_legacy(tx, &unlockers)
    };

    let stripped = if witness {
        serialize_stripped(tx, &[])
    } else {
        raw.clone()
    };
    let txid = txid_hex(&stripped);

    Ok(SignedTransaction { raw, txid })
}

/// DER-encoded low-s signature with the sighash byte appended.
fn ecdsa_sign(key: &[u8; 32], sighash: &[u8; 32]) -> Result<Vec<u8>, ChainError> {
    let signing_key = SigningKey::from_bytes(key.into())
        .map_err(|e| ChainError::InvalidPrivateKey(format!("invalid secp256k1 key: {e}")))?;
    let sig: Signature = signing_key
        .sign_prehash(sighash)
        .map_err(|e| ChainError::SigningError(format!("ECDSA signing failed: {e}")))?;
    // Consensus requires low-s signatures.
    let sig = sig.normalize_s().unwrap_or(sig);

    let mut bytes = sig.to_der().as_bytes().to_vec();
    bytes.push(SIGHASH_ALL as u8);
    Ok(bytes)
}

/// Classic SIGHASH_ALL: serialize the whole transaction with the signed
/// input's scriptPubKey in place of its scriptSig, append the hash type,
/// double-SHA256.
fn legacy_sighash(tx: &UnsignedTx, input_index: usize) -> [u8; 32] {
    let mut buf = Vec::with_capacity(256);
    buf.extend_from_slice(&tx.version.to_le_bytes());

    write_compact_size(&mut buf, tx.inputs.len() as u64);
    for (i, inp) in tx.inputs.iter().enumerate() {
        buf.extend_from_slice(&inp.prev_txid);
        buf.extend_from_slice(&inp.prev_vout.to_le_bytes());
        if i == input_index {
            let script = p2pkh_script(&hash160(&inp.pubkey));
            write_compact_size(&mut buf, script.len() as u64);
            buf.extend_from_slice(&script);
        } else {
            write_compact_size(&mut buf, 0);
        }
        buf.extend_from_slice(&inp.sequence.to_le_bytes());
    }

    write_outputs(&mut buf, &tx.outputs);
    buf.extend_from_slice(&tx.lock_time.to_le_bytes());
    buf.extend_from_slice(&SIGHASH_ALL.to_le_bytes());

    double_sha256(&buf)
}

/// BIP-143 sighash for a P2WPKH input.
fn witness_sighash(tx: &UnsignedTx, input_index: usize) -> [u8; 32] {
    let hash_prevouts = {
        let mut data = Vec::new();
        for inp in &tx.inputs {
            data.extend_from_slice(&inp.prev_txid);
            data.extend_from_slice(&inp.prev_vout.to_le_bytes());
        }
        double_sha256(&data)
    };
    let hash_sequence = {
        let mut data = Vec::new();
        for inp in &tx.inputs {
            data.extend_from_slice(&inp.sequence.to_le_bytes());
        }
        double_sha256(&data)
    };
    let hash_outputs = {
        let mut data = Vec::new();
        write_outputs(&mut data, &tx.outputs);
        // write_outputs prepends the count; BIP-143 hashes outputs only.
        double_sha256(&data[compact_size_len(tx.outputs.len() as u64)..])
    };

    let inp = &tx.inputs[input_index];
    let script_code = p2pkh_script(&hash160(&inp.pubkey));

    let mut buf = Vec::with_capacity(256);
    buf.extend_from_slice(&tx.version.to_le_bytes());
    buf.extend_from_slice(&hash_prevouts);
    buf.extend_from_slice(&hash_sequence);
    buf.extend_from_slice(&inp.prev_txid);
    buf.extend_from_slice(&inp.prev_vout.to_le_bytes());
    write_compact_size(&mut buf, script_code.len() as u64);
    buf.extend_from_slice(&script_code);
    buf.extend_from_slice(&inp.value.to_le_bytes());
    buf.extend_from_slice(&inp.sequence.to_le_bytes());
    buf.extend_from_slice(&hash_outputs);
    buf.extend_from_slice(&tx.lock_time.to_le_bytes());
    buf.extend_from_slice(&SIGHASH_ALL.to_le_bytes());

    double_sha256(&buf)
}

/// Legacy serialization: scriptSig = <sig+hashtype> <pubkey> per input.
fn serialize_legacy(tx: &UnsignedTx, signatures: &[Vec<u8>]) -> Vec<u8> {
    let script_sigs: Vec<Vec<u8>> = tx
        .inputs
        .iter()
        .zip(signatures)
        .map(|(inp, sig)| {
            let mut script = Vec::with_capacity(sig.len() + 35);
            script.push(sig.len() as u8);
            script.extend_from_slice(sig);
            script.push(33);
            script.extend_from_slice(&inp.pubkey);
            script
        })
        .collect();
    serialize_stripped(tx, &script_sigs)
}

/// Segwit serialization: marker/flag framing, empty scriptSigs, one
/// two-element witness stack per input.
fn serialize_witness(tx: &UnsignedTx, signatures: &[Vec<u8>]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(512);
    buf.extend_from_slice(&tx.version.to_le_bytes());
    buf.push(0x00); // marker
    buf.push(0x01); // flag

    write_compact_size(&mut buf, tx.inputs.len() as u64);
    for inp in &tx.inputs {
        buf.extend_from_slice(&inp.prev_txid);
        buf.extend_from_slice(&inp.prev_vout.to_le_bytes());
        write_compact_size(&mut buf, 0);
        buf.extend_from_slice(&inp.sequence.to_le_bytes());
    }

    write_outputs(&mut buf, &tx.outputs);

    for (inp, sig) in tx.inputs.iter().zip(signatures) {
        write_compact_size(&mut buf, 2);
        write_compact_size(&mut buf, sig.len() as u64);
        buf.extend_from_slice(sig);
        write_compact_size(&mut buf, 33);
        buf.extend_from_slice(&inp.pubkey);
    }

    buf.extend_from_slice(&tx.lock_time.to_le_bytes());
    buf
}

/// Witness-stripped serialization; the txid preimage for every chain.
fn serialize_stripped(tx: &UnsignedTx, script_sigs: &[Vec<u8>]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(512);
    buf.extend_from_slice(&tx.version.to_le_bytes());

    write_compact_size(&mut buf, tx.inputs.len() as u64);
    for (i, inp) in tx.inputs.iter().enumerate() {
        buf.extend_from_slice(&inp.prev_txid);
        buf.extend_from_slice(&inp.prev_vout.to_le_bytes());
        match script_sigs.get(i) {
            Some(script) => {
                write_compact_size(&mut buf, script.len() as u64);
                buf.extend_from_slice(script);
            }
            None => write_compact_size(&mut buf, 0),
        }
        buf.extend_from_slice(&inp.sequence.to_le_bytes());
    }

    write_outputs(&mut buf, &tx.outputs);
    buf.extend_from_slice(&tx.lock_time.to_le_bytes());
    buf
}

fn write_outputs(buf: &mut Vec<u8>, outputs: &[TxOutput]) {
    write_compact_size(buf, outputs.len() as u64);
    for out in outputs {
        buf.extend_from_slice(&out.value.to_le_bytes());
        write_compact_size(buf, out.script_pubkey.len() as u64);
        buf.extend_from_slice(&out.script_pubkey);
    }
}

/// Bitcoin-style CompactSize (variable-length integer).
fn write_compact_size(buf: &mut Vec<u8>, val: u64) {
    if val < 0xFD {
        buf.push(val as u8);
    } else if val <= 0xFFFF {
        buf.push(0xFD);
        buf.extend_from_slice(&(val as u16).to_le_bytes());
    } else if val <= 0xFFFF_FFFF {
        buf.push(0xFE);
        buf.extend_from_slice(&(val as u32).to_le_bytes());
    } else {
        buf.push(0xFF);
        buf.extend_from_slice(&val.to_le_bytes());
    }
}

fn compact_size_len(val: u64) -> usize {
    match val {
        0..=0xFC => 1,
        0xFD..=0xFFFF => 3,
        0x1_0000..=0xFFFF_FFFF => 5,
        _ => 9,
    }
}

fn double_sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(Sha256::digest(data)).into()
}

/// Hex txid in display order (byte-reversed double-SHA256).
pub fn txid_hex(stripped: &[u8]) -> String {
    let mut hash = double_sha256(stripped);
    hash.reverse();
    hex::encode(hash)
}

/// Parse a display-order hex txid into internal byte order.
pub fn parse_txid(txid_hex: &str) -> Result<[u8; 32], ChainError> {
    let bytes = hex::decode(txid_hex)
        .map_err(|e| ChainError::TransactionBuildError(format!("invalid txid hex: {e}")))?;
    if bytes.len() != 32 {
        return Err(ChainError::TransactionBuildError(format!(
            "txid must be 32 bytes, got {}",
            bytes.len()
        )));
    }
    let mut result = [0u8; 32];
    for (i, &b) in bytes.iter().rev().enumerate() {
        result[i] = b;
    }
    Ok(result)
}
