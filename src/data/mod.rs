pub mod chains;
pub mod contract;
pub mod provider;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::{Address, U256};
use alloy::signers::local::PrivateKeySigner;
use color_eyre::eyre::Result;
use tokio::sync::RwLock;
use tokio::sync::mpsc;

use crate::data::provider::StudyProvider;
use crate::data::types::{WriteCall, WriteStatus};
use crate::events::AppEvent;

/// How often a broadcast transaction is checked for a receipt.
const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// A view call against the Study contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadCall {
    Courses(Address),
    Notes(Address),
    Achievements(Address),
    Goals(Address),
    EntryFee,
}

impl ReadCall {
    /// The account whose records this call reads. The entry fee is global.
    pub fn account(&self) -> Option<Address> {
        match *self {
            ReadCall::Courses(user)
            | ReadCall::Notes(user)
            | ReadCall::Achievements(user)
            | ReadCall::Goals(user) => Some(user),
            ReadCall::EntryFee => None,
        }
    }
}

/// The reads that make up one page load for `account`: the four record lists
/// and the entry fee. Nothing is read without a connected account.
pub fn plan_reads(account: Option<Address>) -> Vec<ReadCall> {
    match account {
        Some(user) => vec![
            ReadCall::Courses(user),
            ReadCall::Notes(user),
            ReadCall::Achievements(user),
            ReadCall::Goals(user),
            ReadCall::EntryFee,
        ],
        None => Vec::new(),
    }
}

pub struct DataService {
    rpc_url: String,
    contract: Address,
    provider: Arc<RwLock<Arc<StudyProvider>>>,
    settle_delay: Duration,
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl DataService {
    pub fn new(
        provider: StudyProvider,
        rpc_url: String,
        contract: Address,
        settle_delay: Duration,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            rpc_url,
            contract,
            provider: Arc::new(RwLock::new(Arc::new(provider))),
            settle_delay,
            event_tx,
        }
    }

    /// Issue every read for `account` in parallel. Each result arrives as its
    /// own event so sections fill in independently.
    pub fn fetch_all(&self, account: Option<Address>) {
        for read in plan_reads(account) {
            self.fetch(read);
        }
    }

    fn fetch(&self, read: ReadCall) {
        let provider = Arc::clone(&self.provider);
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            let provider = Arc::clone(&*provider.read().await);
            tracing::debug!(?read, "issuing read");
            match run_read(&provider, read).await {
                Ok(event) => {
                    let _ = tx.send(event);
                }
                Err(e) => {
                    tracing::warn!(?read, error = %e, "read failed");
                    let _ = tx.send(AppEvent::ReadFailed {
                        read,
                        message: e.to_string(),
                    });
                }
            }
        });
    }

    /// Sign and send `call`, then follow it through confirmation.
    ///
    /// Emits `WriteStatusChanged` with `Confirming` once the hash is known and
    /// `Confirmed` or `Failed` once a receipt is seen. A confirmed write is
    /// followed by `WriteSettled` after the display delay.
    pub fn submit(&self, call: WriteCall, value: U256) {
        let provider = Arc::clone(&self.provider);
        let tx = self.event_tx.clone();
        let settle_delay = self.settle_delay;
        let kind = call.kind();

        tokio::spawn(async move {
            let provider = Arc::clone(&*provider.read().await);
            let input = contract::encode_write(&call);
            let function = call.function_name();

            let hash = match provider.send(input, value).await {
                Ok(hash) => hash,
                Err(e) => {
                    tracing::warn!(function, error = %e, "write rejected");
                    let _ = tx.send(AppEvent::WriteStatusChanged {
                        kind,
                        status: WriteStatus::Failed(format!("{function} failed: {e}")),
                    });
                    return;
                }
            };
            tracing::info!(function, %hash, %value, "write submitted");
            let _ = tx.send(AppEvent::WriteStatusChanged {
                kind,
                status: WriteStatus::Confirming(hash),
            });

            let status = if provider.wait_for_receipt(hash, RECEIPT_POLL_INTERVAL).await {
                tracing::info!(function, %hash, "write confirmed");
                WriteStatus::Confirmed(hash)
            } else {
                tracing::warn!(function, %hash, "write reverted");
                WriteStatus::Failed(format!("{function} reverted"))
            };
            let confirmed = matches!(status, WriteStatus::Confirmed(_));
            let _ = tx.send(AppEvent::WriteStatusChanged { kind, status });

            if confirmed {
                tokio::time::sleep(settle_delay).await;
                let _ = tx.send(AppEvent::WriteSettled { kind, hash });
            }
        });
    }

    /// Switch the session to the account of `private_key`. The old provider
    /// stays in use until the new one has connected.
    pub fn connect_wallet(&self, private_key: String) {
        let provider = Arc::clone(&self.provider);
        let tx = self.event_tx.clone();
        let rpc_url = self.rpc_url.clone();
        let contract = self.contract;

        tokio::spawn(async move {
            let signer = match private_key.trim().parse::<PrivateKeySigner>() {
                Ok(signer) => signer,
                Err(e) => {
                    let _ = tx.send(AppEvent::WalletError(format!("Invalid private key: {e}")));
                    return;
                }
            };
            match StudyProvider::connect(&rpc_url, contract, Some(signer)).await {
                Ok(connected) => {
                    let account = connected.account();
                    let chain_id = connected.chain_id();
                    *provider.write().await = Arc::new(connected);
                    tracing::info!(?account, chain_id, "wallet connected");
                    if let Some(address) = account {
                        let _ = tx.send(AppEvent::AccountConnected(address));
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "wallet connection failed");
                    let _ = tx.send(AppEvent::WalletError(format!("Connection failed: {e}")));
                }
            }
        });
    }
}

async fn run_read(provider: &StudyProvider, read: ReadCall) -> Result<AppEvent> {
    let data = provider.call(contract::encode_read(&read)).await?;
    let event = match read {
        ReadCall::Courses(account) => AppEvent::CoursesLoaded {
            account,
            records: contract::decode_courses(&data)?,
        },
        ReadCall::Notes(account) => AppEvent::NotesLoaded {
            account,
            records: contract::decode_notes(&data)?,
        },
        ReadCall::Achievements(account) => AppEvent::AchievementsLoaded {
            account,
            records: contract::decode_achievements(&data)?,
        },
        ReadCall::Goals(account) => AppEvent::GoalsLoaded {
            account,
            records: contract::decode_goals(&data)?,
        },
        ReadCall::EntryFee => AppEvent::EntryFeeLoaded(contract::decode_entry_fee(&data)?),
    };
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_reads_disconnected_is_empty() {
        assert!(plan_reads(None).is_empty());
    }

    #[test]
    fn test_plan_reads_connected() {
        let user = Address::from_slice(&[0x05; 20]);
        let reads = plan_reads(Some(user));
        assert_eq!(
            reads,
            vec![
                ReadCall::Courses(user),
                ReadCall::Notes(user),
                ReadCall::Achievements(user),
                ReadCall::Goals(user),
                ReadCall::EntryFee,
            ]
        );
    }

    #[test]
    fn test_read_call_account() {
        let user = Address::from_slice(&[0x05; 20]);
        assert_eq!(ReadCall::Goals(user).account(), Some(user));
        assert_eq!(ReadCall::EntryFee.account(), None);
    }
}
