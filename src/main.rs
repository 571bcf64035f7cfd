mod app;
mod components;
mod config;
mod data;
mod events;
mod logging;
mod theme;
mod utils;

use std::sync::Arc;
use std::time::Duration;

use alloy::signers::local::PrivateKeySigner;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use tokio::sync::mpsc;

use crate::app::App;
use crate::config::Config;
use crate::data::DataService;
use crate::data::provider::StudyProvider;
use crate::data::types::ChainConfig;
use crate::events::AppEvent;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = Config::parse();

    if config.print_abi {
        println!("{}", serde_json::to_string_pretty(&data::contract::study_abi()?)?);
        return Ok(());
    }

    let log_guard = logging::init(&config.log_level);
    if let Some(ref guard) = log_guard {
        eprintln!("Logging to {}", guard.log_dir().display());
    }

    let chain = resolve_chain(&config)?;
    tracing::info!(chain = %chain.name, rpc_url = %chain.rpc_url, contract = %config.contract, "starting");

    let signer = config
        .private_key
        .as_deref()
        .map(|key| key.trim().parse::<PrivateKeySigner>())
        .transpose()
        .wrap_err("invalid --private-key")?;

    eprintln!("Connecting to {}...", chain.rpc_url);
    let provider = StudyProvider::connect(&chain.rpc_url, config.contract, signer).await?;
    let chain_id = provider.chain_id();
    let account = provider.account();

    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let _ = event_tx.send(AppEvent::Connected(chain_id));
    if let Some(address) = account {
        let _ = event_tx.send(AppEvent::AccountConnected(address));
    }

    let data_service = Arc::new(DataService::new(
        provider,
        chain.rpc_url.clone(),
        config.contract,
        Duration::from_millis(config.refresh_delay_ms),
        event_tx,
    ));

    let mut app = App::new(data_service, event_rx, chain, config.tick_rate_ms);

    let terminal = ratatui::init();
    let result = app.run(terminal).await;
    ratatui::restore();

    result
}

/// The chain preset named by `--chain`, with its endpoint replaced by
/// `--rpc-url` when one is given.
fn resolve_chain(config: &Config) -> Result<ChainConfig> {
    let mut chain = data::chains::get_chain_config(&config.chain).ok_or_else(|| {
        eyre!(
            "unknown chain '{}', expected one of: {}",
            config.chain,
            data::chains::supported_chains().join(", ")
        )
    })?;
    if let Some(ref url) = config.rpc_url {
        chain.rpc_url = url.clone();
    }
    Ok(chain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_chain_uses_preset_url() {
        let config = Config::try_parse_from(["study-tui", "--chain", "base-sepolia"]).unwrap();
        let chain = resolve_chain(&config).unwrap();
        assert_eq!(chain.chain_id, 84532);
        assert_eq!(chain.rpc_url, "https://sepolia.base.org");
    }

    #[test]
    fn test_resolve_chain_rpc_override() {
        let config = Config::try_parse_from([
            "study-tui",
            "--chain",
            "localhost",
            "--rpc-url",
            "http://10.0.0.2:8545",
        ])
        .unwrap();
        let chain = resolve_chain(&config).unwrap();
        assert_eq!(chain.name, "Localhost");
        assert_eq!(chain.rpc_url, "http://10.0.0.2:8545");
    }

    #[test]
    fn test_resolve_chain_unknown() {
        let config = Config::try_parse_from(["study-tui", "--chain", "solana"]).unwrap();
        assert!(resolve_chain(&config).is_err());
    }
}
