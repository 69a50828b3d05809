//! Per-chain adapters for the UTXO transaction engine.
//!
//! One parameter table per supported chain, shared Base58Check/bech32 address
//! handling, and a single signer/serializer covering both the legacy P2PKH
//! and segwit P2WPKH transaction formats.

pub mod address;
pub mod adapter;
pub mod error;
pub mod params;
pub mod tx;

pub use adapter::UtxoChainAdapter;
pub use error::ChainError;
pub use params::ChainParams;
