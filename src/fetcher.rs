use crate::{
    gateway::ExplorerApi,
    poller::{PollHandle, PollSettings},
    resolvers, stored_files, summary,
    types::AppEvent,
};
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Work the view asks for. `epoch` identifies the page activation the answer
/// belongs to; the view drops answers for pages it has already left.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchRequest {
    /// Explorer page opened: load the first page and keep polling
    StartPolling { epoch: u64 },
    /// Explorer page left
    StopPolling,
    OlderBlock { epoch: u64, height: u64 },
    StoredFiles { epoch: u64 },
    Wallets { epoch: u64 },
    Block { epoch: u64, height: u64 },
    Contract {
        epoch: u64,
        contract_hash: String,
        file_url: String,
    },
    Wallet { epoch: u64, address: String },
    ContractHash {
        epoch: u64,
        file_url: String,
        storer: String,
    },
    Summary,
}

/// Background task that executes view requests. Owns the explorer poller, so
/// at most one poller runs at a time; every other request runs as its own task.
pub async fn run_fetcher(
    api: Arc<dyn ExplorerApi>,
    settings: PollSettings,
    mut requests: UnboundedReceiver<FetchRequest>,
    events: UnboundedSender<AppEvent>,
) -> Result<()> {
    let mut poll: Option<PollHandle> = None;

    while let Some(req) = requests.recv().await {
        log::debug!("[Fetch] {req:?}");
        match req {
            FetchRequest::StartPolling { epoch } => {
                // Replacing the handle aborts the previous poller
                poll = Some(PollHandle::spawn(
                    api.clone(),
                    settings.clone(),
                    epoch,
                    events.clone(),
                ));
            }
            FetchRequest::StopPolling => {
                if let Some(p) = poll.take() {
                    p.stop();
                }
            }
            other => {
                let api = api.clone();
                let events = events.clone();
                tokio::spawn(async move {
                    if let Some(ev) = resolve(api.as_ref(), other).await {
                        let _ = events.send(ev);
                    }
                });
            }
        }
    }

    log::info!("[Fetch] request channel closed, shutting down");
    Ok(())
}

/// Run one non-polling request to completion.
pub async fn resolve(api: &dyn ExplorerApi, req: FetchRequest) -> Option<AppEvent> {
    let ev = match req {
        FetchRequest::StartPolling { .. } | FetchRequest::StopPolling => return None,
        FetchRequest::OlderBlock { epoch, height } => {
            let block = resolvers::resolve_block(api, Some(height)).await;
            AppEvent::OlderBlock {
                epoch,
                height,
                block,
            }
        }
        FetchRequest::StoredFiles { epoch } => {
            let files = stored_files::resolve_stored_files(api)
                .await
                .unwrap_or_else(|e| {
                    log::error!("Error fetching stored files: {e}");
                    Vec::new()
                });
            AppEvent::StoredFilesLoaded { epoch, files }
        }
        FetchRequest::Wallets { epoch } => {
            let (balances, mined) =
                futures::join!(api.get_wallet_balances(), api.get_mined_coins());
            AppEvent::WalletsLoaded {
                epoch,
                balances: balances.unwrap_or_default(),
                mined: mined.unwrap_or_default(),
            }
        }
        FetchRequest::Block { epoch, height } => AppEvent::BlockResolved {
            epoch,
            block: resolvers::resolve_block(api, Some(height)).await,
        },
        FetchRequest::Contract {
            epoch,
            contract_hash,
            file_url,
        } => AppEvent::ContractResolved {
            epoch,
            detail: resolvers::resolve_contract(api, Some(&contract_hash), Some(&file_url)).await,
        },
        FetchRequest::Wallet { epoch, address } => AppEvent::WalletResolved {
            epoch,
            detail: resolvers::resolve_wallet(api, &address).await,
        },
        FetchRequest::ContractHash {
            epoch,
            file_url,
            storer,
        } => {
            let hash = resolvers::resolve_contract_hash(api, &file_url, &storer).await;
            AppEvent::ContractHashResolved {
                epoch,
                file_url,
                storer,
                hash,
            }
        }
        FetchRequest::Summary => AppEvent::SummaryLoaded(summary::fetch_summary(api).await),
    };
    Some(ev)
}
