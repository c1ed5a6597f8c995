use std::io::Write;

use anyhow::Result;
use clap::{Parser, Subcommand};
use service::Service;

#[derive(Parser, Debug)]
#[command(name = "sui-tool", version, about = "Sui validator gas price tool")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Validator commands
    #[command(subcommand)]
    Validator(ValidatorCommand),

    /// Gas commands
    #[command(subcommand)]
    Gas(GasCommand),
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ValidatorCommand {
    /// Get validators metadata
    GetAll,

    /// Get specific validator metadata
    Get {
        /// Exact (case-sensitive) validator name
        name: String,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum GasCommand {
    /// Calculate gas price
    Calc,

    /// Submit gas price by auto calculation
    AutoSubmit,
}

/// Runs one command against `service`, writing results to `out` and
/// reported failures to `err_out`.
///
/// Listing commands report fetch failures and still succeed. Gas commands
/// return every error so the process exits non-zero and nothing stale is
/// submitted.
pub async fn run<W: Write, E: Write>(
    command: Command,
    service: &dyn Service,
    out: &mut W,
    err_out: &mut E,
) -> Result<()> {
    match command {
        Command::Validator(ValidatorCommand::GetAll) => print_all_validators(service, out, err_out).await,
        Command::Validator(ValidatorCommand::Get { name }) => print_validator(service, &name, out, err_out).await,
        Command::Gas(GasCommand::Calc) => calc_gas_price(service, out).await.map(|_| ()),
        Command::Gas(GasCommand::AutoSubmit) => auto_submit(service, out).await,
    }
}

fn report_fetch_error<E: Write>(err_out: &mut E, err: &anyhow::Error) -> Result<()> {
    log::error!("Error in getting validators: {err:#}");
    writeln!(err_out, "Error in getting validators: {err:#}")?;
    Ok(())
}

pub async fn print_all_validators<W: Write, E: Write>(
    service: &dyn Service,
    out: &mut W,
    err_out: &mut E,
) -> Result<()> {
    let validators = match service.get_validators().await {
        Ok(validators) => validators,
        Err(err) => return report_fetch_error(err_out, &err),
    };
    writeln!(out, "{}", serde_json::to_string_pretty(&validators)?)?;
    Ok(())
}

pub async fn print_validator<W: Write, E: Write>(
    service: &dyn Service,
    name: &str,
    out: &mut W,
    err_out: &mut E,
) -> Result<()> {
    let validator = match service.get_validator_by_name(name).await {
        Ok(validator) => validator,
        Err(err) => return report_fetch_error(err_out, &err),
    };
    match validator {
        Some(validator) => writeln!(out, "{}", serde_json::to_string_pretty(&validator)?)?,
        None => log::warn!("No validator named {name:?}"),
    }
    Ok(())
}

pub async fn calc_gas_price<W: Write>(service: &dyn Service, out: &mut W) -> Result<u64> {
    let report = service.calculate_gas_price().await?;
    writeln!(out, "{report}")?;
    Ok(report.reference_gas_price)
}

pub async fn auto_submit<W: Write>(service: &dyn Service, out: &mut W) -> Result<()> {
    let reference_gas_price = calc_gas_price(service, out).await?;
    let submission = service.submit_gas_price(reference_gas_price).await?;
    writeln!(out, "Submitted gas price: {}", submission.gas_price)?;
    writeln!(out, "{}", submission.output.trim_end())?;
    Ok(())
}
