use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to RPC endpoint failed")]
    Network(#[from] reqwest::Error),

    #[error("could not decode RPC response (HTTP {status})")]
    Decode {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },

    #[error("RPC endpoint returned error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("RPC response has neither a result nor an error")]
    MissingResult,
}
