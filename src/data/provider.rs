use std::time::Duration;

use alloy::network::{EthereumWallet, ReceiptResponse, TransactionBuilder};
use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use color_eyre::eyre::{Result, eyre};

/// JSON-RPC access to the Study contract, optionally with a signing account.
///
/// The concrete provider type depends on whether a wallet filler is attached,
/// so it is kept behind a trait object.
pub struct StudyProvider {
    provider: Box<dyn Provider + Send + Sync>,
    contract: Address,
    account: Option<Address>,
    chain_id: u64,
}

impl StudyProvider {
    /// Connect over HTTP. With a signer, writes are signed locally and sent
    /// from the signer's address.
    pub async fn connect(
        rpc_url: &str,
        contract: Address,
        signer: Option<PrivateKeySigner>,
    ) -> Result<Self> {
        let mut provider = Self::new(rpc_url, contract, signer)?;
        provider.chain_id = provider.provider.get_chain_id().await?;
        Ok(provider)
    }

    /// Build the provider without contacting the endpoint. The chain id stays
    /// 0 until `connect` asks the node for it.
    pub fn new(rpc_url: &str, contract: Address, signer: Option<PrivateKeySigner>) -> Result<Self> {
        let url = rpc_url.parse()?;
        let (provider, account): (Box<dyn Provider + Send + Sync>, Option<Address>) = match signer
        {
            Some(signer) => {
                let account = signer.address();
                let wallet = EthereumWallet::from(signer);
                let provider = ProviderBuilder::new().wallet(wallet).on_http(url);
                (Box::new(provider), Some(account))
            }
            None => (Box::new(ProviderBuilder::new().on_http(url)), None),
        };
        Ok(Self {
            provider,
            contract,
            account,
            chain_id: 0,
        })
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// The connected account, if a signer is attached.
    pub fn account(&self) -> Option<Address> {
        self.account
    }

    /// Execute a view call against the contract and return the raw return data.
    pub async fn call(&self, input: Bytes) -> Result<Bytes> {
        let tx = TransactionRequest::default()
            .with_to(self.contract)
            .with_input(input);
        let data = self.provider.call(tx).await?;
        Ok(data)
    }

    /// Sign and broadcast a contract call. Returns the transaction hash as soon
    /// as the node accepts it.
    pub async fn send(&self, input: Bytes, value: U256) -> Result<B256> {
        let from = self
            .account
            .ok_or_else(|| eyre!("no wallet connected"))?;
        let tx = TransactionRequest::default()
            .with_from(from)
            .with_to(self.contract)
            .with_input(input)
            .with_value(value);
        let pending = self.provider.send_transaction(tx).await?;
        Ok(*pending.tx_hash())
    }

    /// Poll for the receipt of `hash` until it is mined and return its
    /// success flag. Lookup errors are logged and retried on the next tick.
    /// There is no upper bound on the wait.
    pub async fn wait_for_receipt(&self, hash: B256, poll_interval: Duration) -> bool {
        let mut interval = tokio::time::interval(poll_interval);
        loop {
            interval.tick().await;
            match self.provider.get_transaction_receipt(hash).await {
                Ok(Some(receipt)) => return receipt.status(),
                Ok(None) => {}
                Err(e) => tracing::warn!(%hash, error = %e, "receipt lookup failed, retrying"),
            }
        }
    }
}
