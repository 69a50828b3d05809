//! Greedy coin selection.

use log::debug;

use crate::size::transaction_size;
use crate::utxo::SpendableOutput;

/// Result of one selection run. A defaulted (empty) value means the
/// candidates could not satisfy the target: a sentinel, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Absolute fee in minor units.
    pub fee: u64,
    /// Chosen inputs, in candidate order.
    pub inputs: Vec<SpendableOutput>,
    /// Total value of the chosen inputs.
    pub total: u64,
}

/// Greedily accumulate `candidates` until they cover `target` plus fee and
/// dust headroom.
///
/// Candidates are taken strictly in the given order; the caller decides
/// priority (largest-first, chronological, ...). Each step recomputes the fee
/// for the inputs admitted so far assuming two outputs, unless `fixed_size`
/// pins the byte count; the fixed-size path is the exact-size second pass
/// and carries no dust headroom. `dust_threshold` is the chain's, supplied
/// through the adapter.
///
/// The accumulation is inherently sequential: every step depends on the
/// running total. Returns `Selection::default()` when the candidates are
/// exhausted without covering the requirement.
pub fn select_inputs(
    candidates: &[SpendableOutput],
    fee_rate: u64,
    target: u64,
    fixed_size: Option<u64>,
    witness: bool,
    dust_threshold: u64,
) -> Selection {
    let dust = if fixed_size.is_some() { 0 } else { dust_threshold };

    let mut inputs: Vec<SpendableOutput> = Vec::new();
    let mut total: u64 = 0;

    for candidate in candidates {
        let fee = match fixed_size {
            Some(size) => size * fee_rate,
            None => transaction_size(inputs.len(), 2, witness) * fee_rate,
        };

        inputs.push(candidate.clone());
        total = total.saturating_add(candidate.value);

        // A requirement overflowing u64 can never be satisfied.
        let required = target.checked_add(fee).and_then(|r| r.checked_add(dust));
        if required.is_some_and(|r| total >= r) {
            debug!(
                "selected {} of {} candidates: total={total} fee={fee} target={target}",
                inputs.len(),
                candidates.len()
            );
            return Selection { fee, inputs, total };
        }
    }

    debug!(
        "selection failed: {} candidates totalling {total} cannot cover {target}",
        candidates.len()
    );
    Selection::default()
}
