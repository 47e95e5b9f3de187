//! Detail resolvers: one entity per page, keyed by route parameters.
//!
//! A missing parameter or a gateway error ends in the page's not-found or
//! empty state. Nothing here returns an error to the view.

use crate::gateway::ExplorerApi;
use crate::types::{Block, FileProvingWindow, StorageContract, WalletBalance};

/// Data behind the storage-contract detail page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContractDetail {
    pub contract: Option<StorageContract>,
    pub windows: Vec<FileProvingWindow>,
}

/// Data behind the wallet detail page.
#[derive(Clone, Debug, PartialEq)]
pub struct WalletDetail {
    pub address: String,
    pub balance: Option<WalletBalance>,
    pub mined: Option<String>,
}

pub async fn resolve_block(api: &dyn ExplorerApi, height: Option<u64>) -> Option<Block> {
    let height = height?;
    match api.get_block(height).await {
        Ok(block) => block,
        Err(e) => {
            log::error!("Error fetching block #{height}: {e}");
            None
        }
    }
}

/// Contract first, then its proving windows. Both are attempted even if the
/// contract is missing, as the windows are keyed by hash alone.
pub async fn resolve_contract(
    api: &dyn ExplorerApi,
    contract_hash: Option<&str>,
    file_url: Option<&str>,
) -> ContractDetail {
    let (Some(hash), Some(file_url)) = (contract_hash, file_url) else {
        log::debug!("contract detail without contractHash/fileUrl");
        return ContractDetail::default();
    };

    let contract = match api.get_storage_contract(hash, file_url).await {
        Ok(c) => c,
        Err(e) => {
            log::error!("Error fetching storage contract {hash}: {e}");
            None
        }
    };

    let windows = match api.get_contract_file_proving_windows(hash).await {
        Ok(ws) => ws
            .into_iter()
            .filter(|w| {
                let ok = w.is_well_formed();
                if !ok {
                    log::warn!(
                        "dropping proving window {}..{} of {hash}: start after end",
                        w.start_block_index,
                        w.end_block_index
                    );
                }
                ok
            })
            .collect(),
        Err(e) => {
            log::error!("Error fetching file proving windows for {hash}: {e}");
            Vec::new()
        }
    };

    ContractDetail { contract, windows }
}

/// Storers for one file. Empty on failure, like the dialog shows it.
pub async fn resolve_storers(api: &dyn ExplorerApi, file_name: &str) -> Vec<String> {
    api.get_storers_of_file(file_name)
        .await
        .unwrap_or_else(|e| {
            log::error!("Error fetching storers of {file_name}: {e}");
            Vec::new()
        })
}

/// Contract hash binding `storer` to `file_url`, if the network knows one.
pub async fn resolve_contract_hash(
    api: &dyn ExplorerApi,
    file_url: &str,
    storer: &str,
) -> Option<String> {
    match api.get_storage_hash(file_url, storer).await {
        Ok(Some(hash)) => Some(hash),
        Ok(None) => {
            log::warn!("No contract hash found for storer {storer} and file {file_url}");
            None
        }
        Err(e) => {
            log::error!("Error fetching contract hash: {e}");
            None
        }
    }
}

pub async fn resolve_wallet(api: &dyn ExplorerApi, address: &str) -> WalletDetail {
    let balance = match api.get_wallet_balances().await {
        Ok(all) => all.into_iter().find(|w| w.address == address),
        Err(e) => {
            log::error!("Error fetching wallet balances: {e}");
            None
        }
    };
    let mined = match api.get_mined_coins().await {
        Ok(mut coins) => coins.remove(address),
        Err(e) => {
            log::error!("Error fetching mined coins: {e}");
            None
        }
    };
    WalletDetail {
        address: address.to_string(),
        balance,
        mined,
    }
}
