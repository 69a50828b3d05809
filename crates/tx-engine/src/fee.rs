//! Fee quoting across rate tiers.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::adapter::ChainAdapter;
use crate::select::{select_inputs, Selection};
use crate::size::transaction_size;
use crate::utxo::SpendableOutput;

/// Tier identifier used for the caller-supplied custom rate.
pub const CUSTOM_TIER_ID: &str = "custom";

/// A named fee-rate policy, supplied by the rate-oracle collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeTier {
    pub id: String,
    /// Minor units per weight unit.
    pub rate: u64,
}

impl FeeTier {
    pub fn new(id: impl Into<String>, rate: u64) -> Self {
        FeeTier {
            id: id.into(),
            rate,
        }
    }
}

/// Payment amount: a fixed value in minor units, or the whole balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayAmount {
    Exact(u64),
    All,
}

/// The materialized result of running selection for one tier.
///
/// A quote with no inputs and zero fee means the tier is unaffordable; it
/// still carries the tier's nominal rate so callers can display it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeQuote {
    pub tier: String,
    /// Absolute fee in minor units.
    pub fee: u64,
    /// Minor units per weight unit.
    pub fee_rate: u64,
    /// Chosen inputs, in candidate order.
    pub inputs: Vec<SpendableOutput>,
    /// Total value of the chosen inputs.
    pub total: u64,
    /// Exactly one quote per `calc_fee` call carries this flag.
    pub custom: bool,
}

impl FeeQuote {
    fn zero(tier: &FeeTier, custom: bool) -> Self {
        FeeQuote {
            tier: tier.id.clone(),
            fee: 0,
            fee_rate: tier.rate,
            inputs: Vec::new(),
            total: 0,
            custom,
        }
    }

    fn from_selection(tier: &FeeTier, selection: Selection, custom: bool) -> Self {
        FeeQuote {
            tier: tier.id.clone(),
            fee: selection.fee,
            fee_rate: tier.rate,
            inputs: selection.inputs,
            total: selection.total,
            custom,
        }
    }

    /// True when this quote denotes "unaffordable".
    pub fn is_zero(&self) -> bool {
        self.inputs.is_empty()
    }
}

/// Quote every tier (plus the custom tier) against one target amount.
///
/// The adapter supplies the chain constants selection depends on: the
/// witness flag and the dust threshold. Tiers are evaluated independently
/// over the same immutable candidate snapshot; one tier failing to satisfy
/// the target does not short-circuit the others, and result order matches
/// tier input order. When the target is categorically unaffordable
/// (`Exact(0)`, a target above `balance`, or an empty balance for `All`)
/// every tier yields its zero quote, the designed sentinel for "cannot
/// afford any tier".
pub fn calc_fee<A: ChainAdapter + ?Sized>(
    adapter: &A,
    tiers: &[FeeTier],
    custom_rate: Option<u64>,
    utxos: &[SpendableOutput],
    balance: u64,
    amount: PayAmount,
    fixed_size: Option<u64>,
) -> Vec<FeeQuote> {
    let witness = adapter.is_witness();
    let dust = adapter.dust_threshold();
    let mut all_tiers: Vec<FeeTier> = tiers.to_vec();
    all_tiers.push(FeeTier::new(CUSTOM_TIER_ID, custom_rate.unwrap_or(0)));
    let custom_index = all_tiers.len() - 1;

    let affordable = match amount {
        PayAmount::Exact(value) => value > 0 && balance >= value,
        PayAmount::All => balance > 0,
    };
    if !affordable {
        warn!("target {amount:?} unaffordable against balance {balance}, quoting zero tiers");
        return all_tiers
            .iter()
            .enumerate()
            .map(|(i, tier)| FeeQuote::zero(tier, i == custom_index))
            .collect();
    }

    all_tiers
        .iter()
        .enumerate()
        .map(|(i, tier)| {
            let custom = i == custom_index;
            let quote = match amount {
                PayAmount::Exact(value) => {
                    let selection =
                        select_inputs(utxos, tier.rate, value, fixed_size, witness, dust);
                    FeeQuote::from_selection(tier, selection, custom)
                }
                PayAmount::All => send_all_quote(tier, utxos, witness, custom),
            };
            debug!(
                "tier {}: fee={} inputs={} total={}",
                quote.tier,
                quote.fee,
                quote.inputs.len(),
                quote.total
            );
            quote
        })
        .collect()
}

/// Send-everything quote: every candidate is taken and the fee comes from
/// the actual candidate count with a single output and no dust headroom.
fn send_all_quote(tier: &FeeTier, utxos: &[SpendableOutput], witness: bool, custom: bool) -> FeeQuote {
    let total: u64 = utxos.iter().map(|u| u.value).sum();
    // The estimator budgets one input beyond the passed count; a sweep's
    // input set is already final.
    let fee = transaction_size(utxos.len().saturating_sub(1), 1, witness) * tier.rate;
    if fee >= total {
        return FeeQuote::zero(tier, custom);
    }
    FeeQuote {
        tier: tier.id.clone(),
        fee,
        fee_rate: tier.rate,
        inputs: utxos.to_vec(),
        total,
        custom,
    }
}
