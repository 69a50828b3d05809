//! Exact conversion between a chain's display unit and its 8-decimal minor
//! unit. Integer arithmetic only; floating point never touches amounts.

use crate::error::EngineError;

/// Minor units per display coin (8 decimals for every supported chain).
pub const MINOR_PER_COIN: u64 = 100_000_000;

const DECIMALS: usize = 8;

/// Parse a display-unit decimal string into minor units.
///
/// Accepts plain integers and up to 8 fractional digits. Rejects anything
/// else: signs, exponents, more than 8 decimals, overflow.
pub fn parse_display(s: &str) -> Result<u64, EngineError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(EngineError::InvalidAmount("empty amount".into()));
    }

    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(EngineError::InvalidAmount(format!("not a number: {s:?}")));
    }
    if frac.len() > DECIMALS {
        return Err(EngineError::InvalidAmount(format!(
            "more than {DECIMALS} decimal places: {s:?}"
        )));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(EngineError::InvalidAmount(format!("not a number: {s:?}")));
    }

    let whole_part: u64 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| EngineError::InvalidAmount(format!("amount too large: {s:?}")))?
    };

    let mut frac_part: u64 = 0;
    if !frac.is_empty() {
        frac_part = frac
            .parse()
            .map_err(|_| EngineError::InvalidAmount(format!("not a number: {s:?}")))?;
        frac_part *= 10u64.pow((DECIMALS - frac.len()) as u32);
    }

    whole_part
        .checked_mul(MINOR_PER_COIN)
        .and_then(|w| w.checked_add(frac_part))
        .ok_or_else(|| EngineError::InvalidAmount(format!("amount too large: {s:?}")))
}

/// Format minor units as a display-unit decimal string.
///
/// Trailing fractional zeros are trimmed; whole amounts render without a
/// decimal point.
pub fn format_minor(minor: u64) -> String {
    let whole = minor / MINOR_PER_COIN;
    let frac = minor % MINOR_PER_COIN;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{frac:08}");
    format!("{whole}.{}", frac.trim_end_matches('0'))
}
