use serde::{Deserialize, Serialize};

use chain_utxo::params::{self, ChainParams};
use chain_utxo::UtxoChainAdapter;

/// Supported blockchain networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainId {
    Bitcoin,
    Litecoin,
    Digibyte,
    Dogecoin,
    Dash,
}

impl ChainId {
    pub const ALL: [ChainId; 5] = [
        ChainId::Bitcoin,
        ChainId::Litecoin,
        ChainId::Digibyte,
        ChainId::Dogecoin,
        ChainId::Dash,
    ];

    /// Network parameter table for this chain
    pub fn params(&self) -> &'static ChainParams {
        match self {
            ChainId::Bitcoin => &params::BITCOIN,
            ChainId::Litecoin => &params::LITECOIN,
            ChainId::Digibyte => &params::DIGIBYTE,
            ChainId::Dogecoin => &params::DOGECOIN,
            ChainId::Dash => &params::DASH,
        }
    }

    /// The signing/serialization adapter for this chain
    pub fn adapter(&self) -> UtxoChainAdapter {
        UtxoChainAdapter::new(self.params())
    }

    /// BIP-44 coin type
    pub fn coin_type(&self) -> u32 {
        self.params().coin_type
    }

    /// Native token symbol
    pub fn symbol(&self) -> &'static str {
        self.params().ticker
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ChainId::Bitcoin => "Bitcoin",
            ChainId::Litecoin => "Litecoin",
            ChainId::Digibyte => "DigiByte",
            ChainId::Dogecoin => "Dogecoin",
            ChainId::Dash => "Dash",
        }
    }

    /// Whether transactions use segwit serialization and weight accounting
    pub fn is_witness(&self) -> bool {
        self.params().is_witness()
    }
}
