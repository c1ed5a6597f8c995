pub mod error;
pub mod gas;
pub mod model;

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use client::JsonRpcClient;
use common::validator::ValidatorRecord;
use error::SubmissionError;
use model::{GasPriceReport, Submission};

#[async_trait]
pub trait GasPriceSubmitter: Sync + Send {
    /// Votes for `gas_price` as this validator's next-epoch gas price and
    /// returns whatever the signer printed.
    async fn submit_gas_price(&self, gas_price: u64) -> Result<String, SubmissionError>;
}

#[async_trait]
pub trait Service: Sync + Send {
    async fn get_validators(&self) -> Result<Vec<ValidatorRecord>>;
    async fn get_validator_by_name(&self, name: &str) -> Result<Option<ValidatorRecord>>;

    async fn calculate_gas_price(&self) -> Result<GasPriceReport>;
    async fn submit_gas_price(&self, reference_gas_price: u64) -> Result<Submission>;
}

#[derive(Clone)]
pub struct ServiceImpl {
    client: Arc<dyn JsonRpcClient>,
    submitter: Arc<dyn GasPriceSubmitter>,
}

impl ServiceImpl {
    pub fn new(client: Arc<dyn JsonRpcClient>, submitter: Arc<dyn GasPriceSubmitter>) -> Self {
        Self { client, submitter }
    }
}

#[async_trait]
impl Service for ServiceImpl {
    async fn get_validators(&self) -> Result<Vec<ValidatorRecord>> {
        let validators = self.client.get_validators().await?;
        log::info!("Total validators: {}", validators.len());
        Ok(validators)
    }

    async fn get_validator_by_name(&self, name: &str) -> Result<Option<ValidatorRecord>> {
        let validators = self.get_validators().await?;
        Ok(validators.into_iter().find(|validator| validator.name == name))
    }

    async fn calculate_gas_price(&self) -> Result<GasPriceReport> {
        let state = self.client.get_latest_system_state().await?;
        if let (Some(epoch), Some(price)) = (&state.epoch, &state.reference_gas_price) {
            log::info!("Epoch {epoch} reference gas price is {price}");
        }
        let report = gas::aggregate(&state.active_validators).context("Failed to aggregate gas prices")?;
        log::info!("Estimated next reference gas price: {}", report.reference_gas_price);
        Ok(report)
    }

    async fn submit_gas_price(&self, reference_gas_price: u64) -> Result<Submission> {
        let gas_price = gas::submission_price(reference_gas_price)?;
        log::info!("Submitting gas price {gas_price}");
        let output = self
            .submitter
            .submit_gas_price(gas_price)
            .await
            .with_context(|| format!("Failed to submit gas price {gas_price}"))?;
        Ok(Submission { gas_price, output })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use client::ClientError;
    use common::state::SystemState;

    use super::*;
    use crate::error::GasError;

    struct StaticClient {
        validators: Vec<ValidatorRecord>,
    }

    #[async_trait]
    impl JsonRpcClient for StaticClient {
        async fn get_latest_system_state(&self) -> Result<SystemState, ClientError> {
            Ok(SystemState {
                epoch: Some("312".to_string()),
                reference_gas_price: Some("750".to_string()),
                active_validators: self.validators.clone(),
                ..Default::default()
            })
        }
    }

    struct FailingClient;

    #[async_trait]
    impl JsonRpcClient for FailingClient {
        async fn get_latest_system_state(&self) -> Result<SystemState, ClientError> {
            Err(ClientError::MissingResult)
        }
    }

    #[derive(Default)]
    struct RecordingSubmitter {
        submitted: Mutex<Vec<u64>>,
    }

    #[async_trait]
    impl GasPriceSubmitter for RecordingSubmitter {
        async fn submit_gas_price(&self, gas_price: u64) -> Result<String, SubmissionError> {
            self.submitted.lock().unwrap().push(gas_price);
            Ok(format!("submitted {gas_price}"))
        }
    }

    fn validator(name: &str, gas_price: &str, stake: &str, voting_power: &str) -> ValidatorRecord {
        ValidatorRecord {
            name: name.to_string(),
            next_epoch_gas_price: gas_price.to_string(),
            next_epoch_stake: stake.to_string(),
            voting_power: voting_power.to_string(),
            ..Default::default()
        }
    }

    fn service_with(validators: Vec<ValidatorRecord>) -> (ServiceImpl, Arc<RecordingSubmitter>) {
        let submitter = Arc::new(RecordingSubmitter::default());
        let service = ServiceImpl::new(Arc::new(StaticClient { validators }), submitter.clone());
        (service, submitter)
    }

    #[tokio::test]
    async fn finds_validator_by_exact_name() {
        let (service, _) = service_with(vec![
            validator("Mysten-1", "750", "1", "1"),
            validator("mysten-1", "800", "1", "1"),
        ]);

        let found = service.get_validator_by_name("mysten-1").await.unwrap().unwrap();
        assert_eq!(found.next_epoch_gas_price, "800");
        assert!(service.get_validator_by_name("Mysten").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn calculates_report_from_fetched_validators() {
        let (service, _) = service_with(vec![
            validator("a", "100", "100", "3000"),
            validator("b", "200", "200", "4000"),
            validator("c", "300", "300", "5000"),
        ]);

        let report = service.calculate_gas_price().await.unwrap();

        assert_eq!(report.validator_count, 3);
        assert_eq!(report.reference_gas_price, 200);
    }

    #[tokio::test]
    async fn empty_validator_set_is_an_error() {
        let (service, _) = service_with(vec![]);

        let err = service.calculate_gas_price().await.unwrap_err();

        assert_matches!(err.downcast_ref::<GasError>(), Some(GasError::EmptyValidatorSet));
    }

    #[tokio::test]
    async fn fetch_failure_keeps_client_error() {
        let service = ServiceImpl::new(Arc::new(FailingClient), Arc::new(RecordingSubmitter::default()));

        let err = service.get_validators().await.unwrap_err();

        assert_matches!(err.downcast_ref::<ClientError>(), Some(ClientError::MissingResult));
    }

    #[tokio::test]
    async fn submits_reference_price_minus_margin() {
        let (service, submitter) = service_with(vec![]);

        let submission = service.submit_gas_price(750).await.unwrap();

        assert_eq!(submission.gas_price, 745);
        assert_eq!(submission.output, "submitted 745");
        assert_eq!(*submitter.submitted.lock().unwrap(), vec![745]);
    }

    #[tokio::test]
    async fn price_below_margin_is_never_submitted() {
        let (service, submitter) = service_with(vec![]);

        let err = service.submit_gas_price(4).await.unwrap_err();

        assert_matches!(err.downcast_ref::<GasError>(), Some(GasError::PriceBelowMargin { .. }));
        assert!(submitter.submitted.lock().unwrap().is_empty());
    }
}
