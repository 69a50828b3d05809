use thiserror::Error;

/// Engine operation errors.
///
/// Validation errors surface before any key resolution; insufficiency is
/// always reported, never clamped; collaborator faults are wrapped with the
/// chain tag and are fatal for the request.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid fee: {0}")]
    InvalidFee(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("insufficient funds: have {available}, need {needed}")]
    InsufficientFunds { needed: u64, available: u64 },

    #[error("key resolution failed for {branch}/{index}: {reason}")]
    KeyResolution {
        branch: &'static str,
        index: u32,
        reason: String,
    },

    #[error("{chain} transaction build failed: {reason}")]
    BuildFailed {
        chain: &'static str,
        reason: String,
    },
}
