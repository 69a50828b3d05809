//! Address encoding and script construction.
//!
//! Legacy chains use Base58Check P2PKH addresses; witness chains additionally
//! accept segwit v0 bech32 addresses. Both forms resolve to a scriptPubKey.

use bech32::{FromBase32, ToBase32, Variant};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use crate::error::ChainError;
use crate::params::ChainParams;

/// RIPEMD-160(SHA-256(data)), the pubkey hash used by both address forms.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(data);
    Ripemd160::digest(sha).into()
}

/// P2PKH scriptPubKey: OP_DUP OP_HASH160 <20> OP_EQUALVERIFY OP_CHECKSIG.
pub fn p2pkh_script(pubkey_hash: &[u8; 20]) -> Vec<u8> {
    let mut script = Vec::with_capacity(25);
    script.push(0x76);
    script.push(0xA9);
    script.push(0x14);
    script.extend_from_slice(pubkey_hash);
    script.push(0x88);
    script.push(0xAC);
    script
}

/// P2WPKH scriptPubKey: OP_0 <20-byte hash>.
pub fn p2wpkh_script(pubkey_hash: &[u8; 20]) -> Vec<u8> {
    let mut script = Vec::with_capacity(22);
    script.push(0x00);
    script.push(0x14);
    script.extend_from_slice(pubkey_hash);
    script
}

/// Derive the chain's canonical address for a compressed public key:
/// bech32 P2WPKH on witness chains, Base58Check P2PKH otherwise.
pub fn pubkey_to_address(
    pubkey: &[u8; 33],
    params: &ChainParams,
) -> Result<String, ChainError> {
    if pubkey[0] != 0x02 && pubkey[0] != 0x03 {
        return Err(ChainError::InvalidPublicKey(
            "compressed key must start with 0x02 or 0x03".into(),
        ));
    }
    let hash = hash160(pubkey);
    match params.bech32_hrp {
        Some(hrp) => encode_segwit(hrp, &hash),
        None => Ok(encode_p2pkh(params.p2pkh_version, &hash)),
    }
}

/// Base58Check P2PKH address: version byte + hash160 + 4-byte checksum.
pub fn encode_p2pkh(version: u8, pubkey_hash: &[u8; 20]) -> String {
    let mut payload = Vec::with_capacity(21);
    payload.push(version);
    payload.extend_from_slice(pubkey_hash);
    bs58::encode(payload).with_check().into_string()
}

fn encode_segwit(hrp: &str, pubkey_hash: &[u8; 20]) -> Result<String, ChainError> {
    let version = bech32::u5::try_from_u8(0)
        .map_err(|e| ChainError::InvalidAddress(format!("bech32 witness version: {e}")))?;
    let mut data = vec![version];
    data.extend(pubkey_hash.to_base32());
    bech32::encode(hrp, data, Variant::Bech32)
        .map_err(|e| ChainError::InvalidAddress(format!("bech32 encoding: {e}")))
}

/// Resolve an address string to the scriptPubKey it pays to.
///
/// Accepts a segwit v0 address when the chain carries an HRP, and a P2PKH
/// address on every chain. Wrong networks, bad checksums, and unsupported
/// witness versions are rejected.
pub fn address_to_script(address: &str, params: &ChainParams) -> Result<Vec<u8>, ChainError> {
    if let Some(hrp) = params.bech32_hrp {
        if address
            .to_ascii_lowercase()
            .starts_with(&format!("{hrp}1"))
        {
            let hash = decode_segwit(address, hrp)?;
            return Ok(p2wpkh_script(&hash));
        }
    }
    let hash = decode_p2pkh(address, params.p2pkh_version)?;
    Ok(p2pkh_script(&hash))
}

/// Syntactic validity of an address for this chain.
pub fn validate_address(address: &str, params: &ChainParams) -> bool {
    address_to_script(address, params).is_ok()
}

fn decode_p2pkh(address: &str, version: u8) -> Result<[u8; 20], ChainError> {
    let payload = bs58::decode(address)
        .with_check(None)
        .into_vec()
        .map_err(|e| ChainError::InvalidAddress(format!("base58check: {e}")))?;
    if payload.len() != 21 {
        return Err(ChainError::InvalidAddress(format!(
            "expected 21 payload bytes, got {}",
            payload.len()
        )));
    }
    if payload[0] != version {
        return Err(ChainError::InvalidAddress(format!(
            "version byte {:#04x} does not match this chain",
            payload[0]
        )));
    }
    let mut hash = [0u8; 20];
    hash.copy_from_slice(&payload[1..]);
    Ok(hash)
}

fn decode_segwit(address: &str, expected_hrp: &str) -> Result<[u8; 20], ChainError> {
    let (hrp, data, variant) = bech32::decode(address)
        .map_err(|e| ChainError::InvalidAddress(format!("bech32: {e}")))?;
    if hrp != expected_hrp {
        return Err(ChainError::InvalidAddress(format!(
            "prefix {hrp:?} does not match this chain"
        )));
    }
    if data.is_empty() || data[0].to_u8() != 0 {
        return Err(ChainError::InvalidAddress(
            "only witness version 0 is supported".into(),
        ));
    }
    if variant != Variant::Bech32 {
        return Err(ChainError::InvalidAddress(
            "witness v0 requires bech32 (not bech32m)".into(),
        ));
    }
    let program = Vec::<u8>::from_base32(&data[1..])
        .map_err(|e| ChainError::InvalidAddress(format!("bech32 payload: {e}")))?;
    if program.len() != 20 {
        return Err(ChainError::InvalidAddress(format!(
            "expected a 20-byte program, got {}",
            program.len()
        )));
    }
    let mut hash = [0u8; 20];
    hash.copy_from_slice(&program);
    Ok(hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;

    // secp256k1 generator point, compressed: the classic test pubkey.
    const PUBKEY_HEX: &str = "0279BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798";

    fn test_pubkey() -> [u8; 33] {
        hex::decode(PUBKEY_HEX).unwrap().try_into().unwrap()
    }

    #[test]
    fn bitcoin_p2wpkh_test_vector() {
        // BIP-173 reference: hash160 of the generator pubkey.
        let addr = pubkey_to_address(&test_pubkey(), &params::BITCOIN).unwrap();
        assert_eq!(addr, "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4");
    }

    #[test]
    fn litecoin_and_digibyte_share_the_program_but_not_the_prefix() {
        let ltc = pubkey_to_address(&test_pubkey(), &params::LITECOIN).unwrap();
        let dgb = pubkey_to_address(&test_pubkey(), &params::DIGIBYTE).unwrap();
        assert!(ltc.starts_with("ltc1"));
        assert!(dgb.starts_with("dgb1"));
        assert_ne!(ltc, dgb);
    }

    #[test]
    fn dogecoin_addresses_start_with_d() {
        let addr = pubkey_to_address(&test_pubkey(), &params::DOGECOIN).unwrap();
        assert!(addr.starts_with('D'), "got {addr}");
    }

    #[test]
    fn dash_addresses_start_with_x() {
        let addr = pubkey_to_address(&test_pubkey(), &params::DASH).unwrap();
        assert!(addr.starts_with('X'), "got {addr}");
    }

    #[test]
    fn invalid_pubkey_prefix_is_rejected() {
        let mut pk = test_pubkey();
        pk[0] = 0x04;
        assert!(pubkey_to_address(&pk, &params::BITCOIN).is_err());
    }

    #[test]
    fn segwit_address_resolves_to_p2wpkh_script() {
        let script =
            address_to_script("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4", &params::BITCOIN)
                .unwrap();
        assert_eq!(script.len(), 22);
        assert_eq!(script[0], 0x00);
        assert_eq!(script[1], 0x14);
        assert_eq!(&script[2..], &hash160(&test_pubkey()));
    }

    #[test]
    fn p2pkh_address_resolves_on_witness_chains_too() {
        let hash = hash160(&test_pubkey());
        let addr = encode_p2pkh(params::BITCOIN.p2pkh_version, &hash);
        let script = address_to_script(&addr, &params::BITCOIN).unwrap();
        assert_eq!(script.len(), 25);
        assert_eq!(script[0], 0x76);
        assert_eq!(&script[3..23], &hash);
    }

    #[test]
    fn p2pkh_roundtrip_on_legacy_chains() {
        let hash = hash160(&test_pubkey());
        for p in [&params::DOGECOIN, &params::DASH] {
            let addr = encode_p2pkh(p.p2pkh_version, &hash);
            let script = address_to_script(&addr, p).unwrap();
            assert_eq!(&script[3..23], &hash);
        }
    }

    #[test]
    fn wrong_network_is_rejected() {
        let doge = pubkey_to_address(&test_pubkey(), &params::DOGECOIN).unwrap();
        assert!(address_to_script(&doge, &params::DASH).is_err());
        assert!(address_to_script("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4", &params::LITECOIN).is_err());
    }

    #[test]
    fn bech32_rejected_on_legacy_chains() {
        assert!(!validate_address(
            "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4",
            &params::DOGECOIN
        ));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(!validate_address("", &params::BITCOIN));
        assert!(!validate_address("notanaddress!!!", &params::BITCOIN));
        assert!(!validate_address("D000IIIlll", &params::DOGECOIN));
    }

    #[test]
    fn bad_checksum_is_rejected() {
        let hash = hash160(&test_pubkey());
        let mut addr = encode_p2pkh(params::DOGECOIN.p2pkh_version, &hash);
        // Flip the last character to break the checksum.
        let last = addr.pop().unwrap();
        addr.push(if last == '1' { '2' } else { '1' });
        assert!(!validate_address(&addr, &params::DOGECOIN));
    }

    #[test]
    fn hash160_known_length_and_determinism() {
        let h1 = hash160(b"hello");
        let h2 = hash160(b"hello");
        assert_eq!(h1, h2);
        assert_ne!(h1, hash160(b"world"));
    }
}
