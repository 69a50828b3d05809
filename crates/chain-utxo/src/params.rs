//! Per-chain constants: everything that varies between the supported chains.

/// Network parameters for one UTXO chain.
///
/// `bech32_hrp` doubles as the witness flag: chains carrying an HRP use
/// segwit serialization and the witness weight discount, the others stay on
/// the legacy P2PKH format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainParams {
    pub name: &'static str,
    pub ticker: &'static str,
    /// BIP-44 coin type.
    pub coin_type: u32,
    /// Version byte for Base58Check P2PKH addresses.
    pub p2pkh_version: u8,
    /// Human-readable part for segwit v0 addresses, when supported.
    pub bech32_hrp: Option<&'static str>,
    /// Minimum output value worth creating, in minor units.
    pub dust_threshold: u64,
}

impl ChainParams {
    pub fn is_witness(&self) -> bool {
        self.bech32_hrp.is_some()
    }

    /// BIP-44 purpose level: 84' for native-segwit chains, 44' otherwise.
    pub fn purpose(&self) -> u32 {
        if self.is_witness() {
            84
        } else {
            44
        }
    }
}

pub const BITCOIN: ChainParams = ChainParams {
    name: "bitcoin",
    ticker: "BTC",
    coin_type: 0,
    p2pkh_version: 0x00,
    bech32_hrp: Some("bc"),
    dust_threshold: 1_000,
};

pub const LITECOIN: ChainParams = ChainParams {
    name: "litecoin",
    ticker: "LTC",
    coin_type: 2,
    p2pkh_version: 0x30,
    bech32_hrp: Some("ltc"),
    dust_threshold: 1_000,
};

pub const DIGIBYTE: ChainParams = ChainParams {
    name: "digibyte",
    ticker: "DGB",
    coin_type: 20,
    p2pkh_version: 0x1E,
    bech32_hrp: Some("dgb"),
    dust_threshold: 1_000,
};

pub const DOGECOIN: ChainParams = ChainParams {
    name: "dogecoin",
    ticker: "DOGE",
    coin_type: 3,
    p2pkh_version: 0x1E,
    bech32_hrp: None,
    dust_threshold: 1_000,
};

pub const DASH: ChainParams = ChainParams {
    name: "dash",
    ticker: "DASH",
    coin_type: 5,
    p2pkh_version: 0x4C,
    bech32_hrp: None,
    dust_threshold: 1_000,
};

/// All supported chains.
pub const ALL: [&ChainParams; 5] = [&BITCOIN, &LITECOIN, &DIGIBYTE, &DOGECOIN, &DASH];
