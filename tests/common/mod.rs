#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use storx::error::{RequestError, RequestResult};
use storx::gateway::ExplorerApi;
use storx::types::{
    Block, FileProvingWindow, StorageContract, Transaction, WalletBalance,
};

pub fn block(height: u64, txs: &[&str]) -> Block {
    Block {
        height,
        hash: format!("hash{height}"),
        transactions: txs
            .iter()
            .map(|id| Transaction::new(*id, "TRANSFER"))
            .collect(),
        previous_hash: None,
        timestamp: None,
    }
}

/// In-memory explorer API. Unset data behaves like an empty server;
/// names listed in `failing` answer with a 500.
#[derive(Default)]
pub struct FakeApi {
    /// Answers to successive `get_blocks` calls; empty once drained
    pub block_pages: Mutex<VecDeque<RequestResult<Vec<Block>>>>,
    pub block_limits: Mutex<Vec<Option<u32>>>,
    pub blocks_by_height: HashMap<u64, Block>,
    pub stored_files: Vec<String>,
    pub storers: HashMap<String, Vec<String>>,
    pub failing_storers: Vec<String>,
    pub balances: Vec<WalletBalance>,
    pub mined: BTreeMap<String, String>,
    pub contracts: HashMap<String, StorageContract>,
    pub windows: HashMap<String, Vec<FileProvingWindow>>,
    pub hashes: HashMap<(String, String), String>,
    pub fail_summary: bool,
    pub calls: AtomicUsize,
    /// Latency of every `get_blocks` call
    pub blocks_delay: Option<Duration>,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl FakeApi {
    pub fn with_pages(pages: Vec<RequestResult<Vec<Block>>>) -> Self {
        Self {
            block_pages: Mutex::new(pages.into()),
            ..Default::default()
        }
    }

    pub fn limits(&self) -> Vec<Option<u32>> {
        self.block_limits.lock().unwrap().clone()
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn server_error(resource: &'static str) -> RequestError {
    RequestError::status(resource, 500)
}

#[async_trait]
impl ExplorerApi for FakeApi {
    async fn get_blocks(&self, limit: Option<u32>) -> RequestResult<Vec<Block>> {
        self.hit();
        self.block_limits.lock().unwrap().push(limit);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(d) = self.blocks_delay {
            tokio::time::sleep(d).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.block_pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn get_block(&self, height: u64) -> RequestResult<Option<Block>> {
        self.hit();
        Ok(self.blocks_by_height.get(&height).cloned())
    }

    async fn get_wallet_balances(&self) -> RequestResult<Vec<WalletBalance>> {
        self.hit();
        Ok(self.balances.clone())
    }

    async fn get_stored_files(&self) -> RequestResult<Vec<String>> {
        self.hit();
        Ok(self.stored_files.clone())
    }

    async fn get_storage_contracts(&self, file_name: &str) -> RequestResult<Vec<StorageContract>> {
        self.hit();
        Ok(self
            .contracts
            .values()
            .filter(|c| c.file_url == file_name)
            .cloned()
            .collect())
    }

    async fn get_storage_contracts_chunk(
        &self,
        file_name: &str,
        offset: u64,
        limit: u64,
    ) -> RequestResult<Vec<StorageContract>> {
        let all = self.get_storage_contracts(file_name).await?;
        Ok(all
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn send_transaction(&self, _tx: &Transaction) -> RequestResult<String> {
        self.hit();
        Ok("Transaction accepted".into())
    }

    async fn send_block(&self, _block: &Block) -> RequestResult<String> {
        self.hit();
        Ok("Block accepted".into())
    }

    async fn archive_file(
        &self,
        _file: serde_json::Value,
        _data: serde_json::Value,
    ) -> RequestResult<String> {
        self.hit();
        Ok("File archived successfully".into())
    }

    async fn get_mined_coins(&self) -> RequestResult<BTreeMap<String, String>> {
        self.hit();
        Ok(self.mined.clone())
    }

    async fn get_archived_storage(&self) -> RequestResult<String> {
        self.hit();
        if self.fail_summary {
            return Err(server_error("archivedStorage"));
        }
        Ok("1.2 GB".into())
    }

    async fn get_total_amount_of_contracts(&self) -> RequestResult<String> {
        self.hit();
        if self.fail_summary {
            return Err(server_error("totalAmountOfContracts"));
        }
        Ok("17".into())
    }

    async fn get_total_amount_of_coins(&self) -> RequestResult<String> {
        self.hit();
        Ok("5000".into())
    }

    async fn get_storers_of_file(&self, file_name: &str) -> RequestResult<Vec<String>> {
        self.hit();
        if self.failing_storers.iter().any(|f| f == file_name) {
            return Err(server_error("storersOfFile"));
        }
        Ok(self.storers.get(file_name).cloned().unwrap_or_default())
    }

    async fn get_storage_hash(
        &self,
        file_url: &str,
        storer: &str,
    ) -> RequestResult<Option<String>> {
        self.hit();
        Ok(self
            .hashes
            .get(&(file_url.to_string(), storer.to_string()))
            .cloned())
    }

    async fn get_storage_contract(
        &self,
        contract_hash: &str,
        _file_url: &str,
    ) -> RequestResult<Option<StorageContract>> {
        self.hit();
        Ok(self.contracts.get(contract_hash).cloned())
    }

    async fn get_contract_file_proving_windows(
        &self,
        contract_hash: &str,
    ) -> RequestResult<Vec<FileProvingWindow>> {
        self.hit();
        Ok(self.windows.get(contract_hash).cloned().unwrap_or_default())
    }
}
