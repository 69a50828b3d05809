use serde::{Deserialize, Serialize};

/// Which side of the key tree a locator points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Branch {
    /// Receive addresses (`.../0/index`).
    External,
    /// Change addresses (`.../1/index`).
    Internal,
}

impl Branch {
    /// BIP-44 change-level value.
    pub fn child_number(self) -> u32 {
        match self {
            Branch::External => 0,
            Branch::Internal => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Branch::External => "external",
            Branch::Internal => "internal",
        }
    }
}

/// Locates the signing key for an output inside the active key tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyLocator {
    pub branch: Branch,
    pub index: u32,
}

/// A previously received, unspent output.
///
/// Discovered by the synchronization collaborator and consumed once spent in
/// a built transaction. Selection never mutates these; it operates on a fresh
/// ordered snapshot per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendableOutput {
    /// Source transaction id, hex, display byte order.
    pub txid: String,
    /// Output index within the source transaction.
    pub vout: u32,
    /// Owning address.
    pub address: String,
    /// Value in minor units. Always positive.
    pub value: u64,
    /// Where the signing key for this output lives.
    pub locator: KeyLocator,
}
