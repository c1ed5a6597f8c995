use async_trait::async_trait;
use envconfig::Envconfig;
use service::{error::SubmissionError, GasPriceSubmitter};
use tokio::process::Command;

#[derive(Envconfig, Clone, Debug)]
pub struct SignerConfig {
    /// The `sui` client binary. It must already hold the validator's keys and
    /// point at the right network.
    #[envconfig(from = "SUI_BINARY", default = "sui")]
    pub binary: String,
}

pub fn update_gas_price_args(gas_price: u64) -> Vec<String> {
    vec![
        "validator".to_string(),
        "update-gas-price".to_string(),
        gas_price.to_string(),
    ]
}

pub struct SuiCliSigner {
    program: String,
}

impl SuiCliSigner {
    pub fn new(config: SignerConfig) -> Self {
        Self {
            program: config.binary,
        }
    }
}

#[async_trait]
impl GasPriceSubmitter for SuiCliSigner {
    async fn submit_gas_price(&self, gas_price: u64) -> Result<String, SubmissionError> {
        let args = update_gas_price_args(gas_price);
        log::debug!("Running {} {}", self.program, args.join(" "));
        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .await
            .map_err(|source| SubmissionError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            return Err(SubmissionError::Failed {
                program: self.program.clone(),
                status: output.status,
                stdout,
                stderr,
            });
        }
        if !stderr.trim().is_empty() {
            log::warn!("{} wrote to stderr: {}", self.program, stderr.trim());
        }
        Ok(stdout)
    }
}
