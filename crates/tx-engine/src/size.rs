//! Transaction size estimation for fee-rate multiplication.

/// Per-input size of a P2PKH spend (outpoint + scriptSig + sequence).
const LEGACY_INPUT: u64 = 148;
/// Per-output size of a P2PKH output beyond the first.
const LEGACY_OUTPUT: u64 = 34;
/// Fixed legacy overhead: version + counts + locktime.
const LEGACY_OVERHEAD: u64 = 10;

/// Non-witness bytes of a P2WPKH input (outpoint + empty scriptSig + sequence).
const WITNESS_INPUT_BASE: u64 = 41;
/// Full bytes of a P2WPKH input including its witness stack.
const WITNESS_INPUT_TOTAL: u64 = 149;
/// Per-output size beyond the first.
const WITNESS_OUTPUT: u64 = 32;
const WITNESS_OVERHEAD_BASE: u64 = 10;
/// Base overhead plus segwit marker and flag.
const WITNESS_OVERHEAD_TOTAL: u64 = 12;

/// Estimated size in weight units of a transaction with `input_count` chosen
/// inputs and `output_count` outputs.
///
/// The estimate budgets for one input beyond `input_count` (the candidate a
/// selection step is about to admit) and folds the first output into the
/// fixed overhead. Witness sizes apply the standard 3-to-1 weight discount:
/// `ceil((3 * base + total) / 4)`.
pub fn transaction_size(input_count: usize, output_count: usize, witness: bool) -> u64 {
    let inputs = input_count as u64 + 1;
    let outputs = (output_count as u64).saturating_sub(1);

    if witness {
        let base = WITNESS_INPUT_BASE * inputs + WITNESS_OUTPUT * outputs + WITNESS_OVERHEAD_BASE;
        let total =
            WITNESS_INPUT_TOTAL * inputs + WITNESS_OUTPUT * outputs + WITNESS_OVERHEAD_TOTAL;
        // Round the weight-unit division up.
        (3 * base + total + 3) / 4
    } else {
        LEGACY_INPUT * inputs + LEGACY_OUTPUT * outputs + LEGACY_OVERHEAD
    }
}
