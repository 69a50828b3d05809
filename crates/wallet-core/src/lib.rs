//! Wallet facade: multi-chain UTXO transaction engine.
//!
//! Ties the chain-agnostic engine, the per-chain adapters, and the key
//! hierarchy together behind a handful of free functions. Callers hold the
//! wallet state (UTXO snapshots, balances, chosen accounts); this crate
//! turns that state into fee quotes and signed transactions.

pub mod error;
pub mod types;

pub use error::WalletError;
pub use types::ChainId;

pub use tx_engine::{
    calc_fee as engine_fee_quotes, format_minor, make, parse_display, select_inputs,
    transaction_size, Branch,
    BuiltTransaction, FeeQuote, FeeTier, KeyLocator, PayAmount, Selection, SpendableOutput,
    TransactionRequest,
};

pub use wallet_keys::KeyRing;

use chain_utxo::address::pubkey_to_address;

/// Generate a new 24-word BIP-39 mnemonic
pub fn generate_mnemonic() -> Result<String, WalletError> {
    Ok(wallet_keys::mnemonic::generate_mnemonic()?)
}

/// Validate a mnemonic phrase
pub fn validate_mnemonic(phrase: &str) -> bool {
    wallet_keys::mnemonic::validate_mnemonic(phrase)
}

/// Derive the 64-byte seed from mnemonic + optional passphrase.
/// Caller MUST zeroize the returned seed when done.
pub fn mnemonic_to_seed(phrase: &str, passphrase: &str) -> Result<[u8; 64], WalletError> {
    Ok(wallet_keys::mnemonic::mnemonic_to_seed(phrase, passphrase)?)
}

/// Key resolver for one chain account, following the chain's purpose
/// (84' for segwit chains, 44' for legacy ones).
pub fn key_ring(chain: ChainId, seed: &[u8; 64], account: u32) -> KeyRing {
    let params = chain.params();
    KeyRing::new(*seed, params.purpose(), params.coin_type, account)
}

/// Derive the address at `branch/index` of a chain account.
pub fn derive_address(
    chain: ChainId,
    seed: &[u8; 64],
    account: u32,
    branch: Branch,
    index: u32,
) -> Result<String, WalletError> {
    let ring = key_ring(chain, seed, account);
    let key = ring.derive(branch.child_number(), index)?;
    pubkey_to_address(&key.public_key, chain.params())
        .map_err(|e| WalletError::DerivationFailed(e.to_string()))
}

/// Quote every fee tier (plus the custom tier) for a prospective payment.
///
/// Pure computation over the supplied UTXO snapshot; unaffordable tiers
/// come back as zero quotes rather than errors.
pub fn fee_quotes(
    chain: ChainId,
    tiers: &[FeeTier],
    custom_rate: Option<u64>,
    utxos: &[SpendableOutput],
    balance: u64,
    amount: PayAmount,
    fixed_size: Option<u64>,
) -> Vec<FeeQuote> {
    let adapter = chain.adapter();
    engine_fee_quotes(
        &adapter,
        tiers,
        custom_rate,
        utxos,
        balance,
        amount,
        fixed_size,
    )
}

/// Assemble, sign, and serialize a transaction from an accepted quote.
pub fn build_transaction(
    chain: ChainId,
    seed: &[u8; 64],
    account: u32,
    request: &TransactionRequest,
) -> Result<BuiltTransaction, WalletError> {
    let adapter = chain.adapter();
    let ring = key_ring(chain, seed, account);
    let built = make(&adapter, &ring, request)?;
    log::debug!(
        "{}: built transaction {} ({} bytes)",
        chain.symbol(),
        built.hash,
        built.tx.len() / 2
    );
    Ok(built)
}
