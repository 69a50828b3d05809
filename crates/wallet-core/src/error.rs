use thiserror::Error;

use tx_engine::EngineError;
use wallet_keys::KeyError;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Transaction build failed: {0}")]
    TransactionFailed(String),

    #[error("Insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

impl From<EngineError> for WalletError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::InvalidAddress(msg) => WalletError::InvalidAddress(msg),
            EngineError::InvalidAmount(msg) | EngineError::InvalidFee(msg) => {
                WalletError::InvalidAmount(msg)
            }
            EngineError::InsufficientFunds { needed, available } => {
                WalletError::InsufficientFunds { needed, available }
            }
            other => WalletError::TransactionFailed(other.to_string()),
        }
    }
}

impl From<KeyError> for WalletError {
    fn from(e: KeyError) -> Self {
        match e {
            KeyError::InvalidMnemonic(msg) => WalletError::InvalidMnemonic(msg),
            KeyError::DerivationFailed(msg) => WalletError::DerivationFailed(msg),
        }
    }
}
