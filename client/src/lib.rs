use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use common::{state::SystemState, validator::ValidatorRecord};
use model::state::{JsonRpcRequest, JsonRpcResponse, GET_LATEST_SYSTEM_STATE};
use serde::de::DeserializeOwned;
use url::Url;

pub use crate::error::ClientError;

pub mod error;
pub mod model;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[async_trait]
pub trait JsonRpcClient: Sync + Send {
    async fn get_latest_system_state(&self) -> Result<SystemState, ClientError>;

    async fn get_validators(&self) -> Result<Vec<ValidatorRecord>, ClientError> {
        let state = self.get_latest_system_state().await?;
        Ok(state.active_validators)
    }
}

pub struct HttpClient {
    http_rpc_url: Url,
    client: Arc<reqwest::Client>,
}

impl HttpClient {
    pub fn new(http_rpc_url: Url, timeout: Duration) -> Result<Self, ClientError> {
        let client = Arc::new(reqwest::Client::builder().timeout(timeout).build()?);
        Ok(Self { http_rpc_url, client })
    }

    async fn call<T: DeserializeOwned>(&self, method: &str) -> Result<T, ClientError> {
        let request = JsonRpcRequest::new(method);
        log::debug!("POST {} {method}", self.http_rpc_url);
        let response = self
            .client
            .post(self.http_rpc_url.clone())
            .json(&request)
            .send()
            .await?;
        // RPC-level errors come back as 200 with an `error` member; status is informational.
        let status = response.status();
        let body = response.text().await?;
        let envelope = serde_json::from_str::<JsonRpcResponse<T>>(&body)
            .map_err(|source| ClientError::Decode { status, source })?;
        match (envelope.result, envelope.error) {
            (_, Some(error)) => Err(ClientError::Rpc {
                code: error.code,
                message: error.message,
            }),
            (Some(result), None) => Ok(result),
            (None, None) => Err(ClientError::MissingResult),
        }
    }
}

#[async_trait]
impl JsonRpcClient for HttpClient {
    async fn get_latest_system_state(&self) -> Result<SystemState, ClientError> {
        self.call(GET_LATEST_SYSTEM_STATE).await
    }
}
