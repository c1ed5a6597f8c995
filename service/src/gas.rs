//! Gas price statistics over the validators' next-epoch quotes.
//!
//! Everything here is pure: records go in, a [`GasPriceReport`] comes out.
//! Rendering the report and submitting a price are left to the callers.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use common::validator::ValidatorRecord;
use num::{BigInt, BigUint, Zero};

use crate::{error::GasError, model::GasPriceReport};

/// Voting power is normalized so that all active validators sum to this.
pub const TOTAL_VOTING_POWER: u64 = 10_000;
/// Strict two-thirds of [`TOTAL_VOTING_POWER`].
pub const QUORUM_THRESHOLD: u64 = 6_667;
/// Amount subtracted from the estimated reference price before it is submitted.
pub const SUBMIT_PRICE_MARGIN: u64 = 5;

/// The parsed numeric view of a [`ValidatorRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GasQuote {
    pub name: String,
    pub gas_price: u64,
    pub stake: BigUint,
    pub voting_power: u64,
}

impl TryFrom<&ValidatorRecord> for GasQuote {
    type Error = GasError;

    fn try_from(record: &ValidatorRecord) -> Result<Self, Self::Error> {
        Ok(GasQuote {
            name: record.name.clone(),
            gas_price: parse_field(record, "nextEpochGasPrice", &record.next_epoch_gas_price)?,
            stake: parse_field(record, "nextEpochStake", &record.next_epoch_stake)?,
            voting_power: parse_field(record, "votingPower", &record.voting_power)?,
        })
    }
}

/// Accepts plain ASCII digits only; `FromStr` alone would also take a leading `+`.
fn parse_field<T: FromStr>(record: &ValidatorRecord, field: &'static str, value: &str) -> Result<T, GasError> {
    let invalid = || GasError::InvalidNumber {
        validator: record.name.clone(),
        field,
        value: value.to_string(),
    };
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    value.parse().map_err(|_| invalid())
}

pub fn min_gas_price(quotes: &[GasQuote]) -> Option<u64> {
    quotes.iter().map(|quote| quote.gas_price).min()
}

pub fn max_gas_price(quotes: &[GasQuote]) -> Option<u64> {
    quotes.iter().map(|quote| quote.gas_price).max()
}

pub fn mean_gas_price(quotes: &[GasQuote]) -> Option<f64> {
    if quotes.is_empty() {
        return None;
    }
    let total: u128 = quotes.iter().map(|quote| u128::from(quote.gas_price)).sum();
    Some(total as f64 / quotes.len() as f64)
}

pub fn median_gas_price(quotes: &[GasQuote]) -> Option<f64> {
    let mut prices = quotes.iter().map(|quote| quote.gas_price).collect::<Vec<_>>();
    prices.sort_unstable();
    let n = prices.len();
    match n {
        0 => None,
        n if n % 2 == 1 => Some(prices[n / 2] as f64),
        n => Some((u128::from(prices[n / 2 - 1]) + u128::from(prices[n / 2])) as f64 / 2.0),
    }
}

pub fn total_stake(quotes: &[GasQuote]) -> BigUint {
    quotes.iter().fold(BigUint::zero(), |total, quote| total + &quote.stake)
}

/// `Σ(price × stake) / Σ(stake)`, or `None` when the total stake is zero.
pub fn stake_weighted_mean(quotes: &[GasQuote]) -> Option<BigDecimal> {
    let total = total_stake(quotes);
    if total.is_zero() {
        return None;
    }
    let weighted = quotes
        .iter()
        .fold(BigUint::zero(), |sum, quote| sum + &quote.stake * quote.gas_price);
    Some(BigDecimal::new(BigInt::from(weighted), 0) / BigDecimal::new(BigInt::from(total), 0))
}

/// Walks the quotes from cheapest to most expensive, accumulating voting power.
/// The last price taken while the accumulated power was still below
/// [`QUORUM_THRESHOLD`] is the estimate. If quorum is never reached this is the
/// highest price. Equal prices keep their input order.
pub fn reference_gas_price(quotes: &[GasQuote]) -> Option<u64> {
    let mut sorted = quotes.iter().collect::<Vec<_>>();
    sorted.sort_by_key(|quote| quote.gas_price);

    let mut cumulative_power = 0u64;
    let mut reference = None;
    for quote in sorted {
        if cumulative_power >= QUORUM_THRESHOLD {
            break;
        }
        reference = Some(quote.gas_price);
        cumulative_power = cumulative_power.saturating_add(quote.voting_power);
    }
    reference
}

pub fn aggregate(validators: &[ValidatorRecord]) -> Result<GasPriceReport, GasError> {
    let quotes = validators
        .iter()
        .map(GasQuote::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let empty = || GasError::EmptyValidatorSet;
    Ok(GasPriceReport {
        validator_count: quotes.len(),
        total_stake: total_stake(&quotes),
        min: min_gas_price(&quotes).ok_or_else(empty)?,
        max: max_gas_price(&quotes).ok_or_else(empty)?,
        mean: mean_gas_price(&quotes).ok_or_else(empty)?,
        median: median_gas_price(&quotes).ok_or_else(empty)?,
        stake_weighted_mean: stake_weighted_mean(&quotes),
        reference_gas_price: reference_gas_price(&quotes).ok_or_else(empty)?,
    })
}

/// The price actually voted for: the estimate minus [`SUBMIT_PRICE_MARGIN`].
pub fn submission_price(reference_gas_price: u64) -> Result<u64, GasError> {
    reference_gas_price
        .checked_sub(SUBMIT_PRICE_MARGIN)
        .ok_or(GasError::PriceBelowMargin {
            reference: reference_gas_price,
            margin: SUBMIT_PRICE_MARGIN,
        })
}
