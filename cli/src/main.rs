use std::{sync::Arc, time::Duration};

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use client::HttpClient;
use envconfig::Envconfig;
use service::ServiceImpl;
use signer::{SignerConfig, SuiCliSigner};
use url::Url;

#[derive(Debug, Envconfig)]
struct AppConfig {
    #[envconfig(from = "SUI_RPC_URL", default = "https://rpc-mainnet.suiscan.xyz:443/")]
    rpc_url: Url,

    #[envconfig(from = "SUI_RPC_TIMEOUT_SECS", default = "30")]
    rpc_timeout_secs: u64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    dotenv::dotenv().ok();
    env_logger::init();

    let app_config = AppConfig::init_from_env()?;
    log::debug!("{app_config:?}");
    let client = HttpClient::new(app_config.rpc_url, Duration::from_secs(app_config.rpc_timeout_secs))?;
    let signer = SuiCliSigner::new(SignerConfig::init_from_env()?);
    let service = ServiceImpl::new(Arc::new(client), Arc::new(signer));

    cli::run(cli.command, &service, &mut std::io::stdout(), &mut std::io::stderr()).await
}
