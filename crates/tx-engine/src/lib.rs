//! Chain-agnostic UTXO transaction engine.
//!
//! Coin selection, fee quoting, and transaction assembly shared by every
//! supported UTXO chain. Per-chain behavior (dust, witness handling, address
//! validation, signing/serialization) comes in through the [`ChainAdapter`]
//! trait; signing keys come from a [`KeySource`]. The engine itself is pure:
//! it owns no wallet state, treats every input as an immutable snapshot, and
//! never retries.

pub mod adapter;
pub mod build;
pub mod error;
pub mod fee;
pub mod select;
pub mod size;
pub mod units;
pub mod utxo;

pub use adapter::{ChainAdapter, KeySource, ResolvedKey, SignError, SignInput, SignOutput, SignedTx};
pub use build::{make, BuiltTransaction, TransactionRequest};
pub use error::EngineError;
pub use fee::{calc_fee, FeeQuote, FeeTier, PayAmount};
pub use select::{select_inputs, Selection};
pub use size::transaction_size;
pub use units::{format_minor, parse_display};
pub use utxo::{Branch, KeyLocator, SpendableOutput};
