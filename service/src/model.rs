use std::fmt::Display;

use bigdecimal::BigDecimal;
use num::BigUint;

#[derive(Debug, Clone, PartialEq)]
pub struct GasPriceReport {
    pub validator_count: usize,
    pub total_stake: BigUint,
    pub min: u64,
    pub max: u64,
    pub mean: f64,
    pub median: f64,
    /// `None` when no validator has any stake for the next epoch.
    pub stake_weighted_mean: Option<BigDecimal>,
    pub reference_gas_price: u64,
}

impl Display for GasPriceReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let weighted = match &self.stake_weighted_mean {
            Some(mean) => format_decimal(mean),
            None => "n/a".to_string(),
        };
        writeln!(f, "===== Gas Price Calculation =====")?;
        writeln!(f, "Total Validators: {}", self.validator_count)?;
        writeln!(f, "Total Next Epoch Stake: {}", self.total_stake)?;
        writeln!(f, "Min Reference Gas Price: {}", self.min)?;
        writeln!(f, "Max Reference Gas Price: {}", self.max)?;
        writeln!(f, "Mean Reference Gas Price: {}", self.mean)?;
        writeln!(f, "Stake Weighted Mean Reference Gas Price: {weighted}")?;
        writeln!(f, "Median Reference Gas Price: {}", self.median)?;
        write!(f, "Estimated Next Reference Gas Price: {}", self.reference_gas_price)
    }
}

/// Six fractional digits, trailing zeros dropped.
fn format_decimal(value: &BigDecimal) -> String {
    let rounded = value.round(6).to_string();
    if rounded.contains('.') {
        rounded.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        rounded
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub gas_price: u64,
    pub output: String,
}
