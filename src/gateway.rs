//! Typed access to the explorer HTTP API.
//!
//! Every remote resource gets one method on [`ExplorerApi`]. Calls are single
//! requests: no retry, no batching, no caching. A failure is logged here and
//! handed back as a [`RequestError`]; deciding whether to show an empty state
//! or a zero value is left to the caller (see `resolvers` and `summary`).

use crate::error::{RequestCause, RequestError, RequestResult};
use crate::types::{
    ArchivePayload, Block, FileProvingWindow, StorageContract, Transaction, WalletBalance,
};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

pub const DEFAULT_TX_ACK: &str = "Transaction accepted";
pub const DEFAULT_BLOCK_ACK: &str = "Block accepted";
pub const DEFAULT_ARCHIVE_ACK: &str = "File archived successfully";

#[async_trait]
pub trait ExplorerApi: Send + Sync {
    /// Most recent blocks, newest first on the reference server (callers must not rely on it).
    async fn get_blocks(&self, limit: Option<u32>) -> RequestResult<Vec<Block>>;
    /// `Ok(None)` when no block exists at `height`.
    async fn get_block(&self, height: u64) -> RequestResult<Option<Block>>;
    async fn get_wallet_balances(&self) -> RequestResult<Vec<WalletBalance>>;
    /// Raw stored-file keys; see `stored_files::parse_file_key`.
    async fn get_stored_files(&self) -> RequestResult<Vec<String>>;
    async fn get_storage_contracts(&self, file_name: &str) -> RequestResult<Vec<StorageContract>>;
    async fn get_storage_contracts_chunk(
        &self,
        file_name: &str,
        offset: u64,
        limit: u64,
    ) -> RequestResult<Vec<StorageContract>>;
    async fn send_transaction(&self, tx: &Transaction) -> RequestResult<String>;
    async fn send_block(&self, block: &Block) -> RequestResult<String>;
    async fn archive_file(
        &self,
        file: serde_json::Value,
        data: serde_json::Value,
    ) -> RequestResult<String>;
    async fn get_mined_coins(&self) -> RequestResult<BTreeMap<String, String>>;
    async fn get_archived_storage(&self) -> RequestResult<String>;
    async fn get_total_amount_of_contracts(&self) -> RequestResult<String>;
    async fn get_total_amount_of_coins(&self) -> RequestResult<String>;

    async fn get_storers_of_file(&self, file_name: &str) -> RequestResult<Vec<String>>;
    /// Contract hash binding `storer` to `file_url`, if any.
    async fn get_storage_hash(&self, file_url: &str, storer: &str)
        -> RequestResult<Option<String>>;
    async fn get_storage_contract(
        &self,
        contract_hash: &str,
        file_url: &str,
    ) -> RequestResult<Option<StorageContract>>;
    async fn get_contract_file_proving_windows(
        &self,
        contract_hash: &str,
    ) -> RequestResult<Vec<FileProvingWindow>>;
}

/// [`ExplorerApi`] over HTTP/JSON.
#[derive(Clone, Debug)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl HttpGateway {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> RequestResult<Self> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(8)
            .tcp_nodelay(true)
            .build()
            .map_err(|e| RequestError::new("client", e))?;
        Ok(Self::with_client(client, base_url, timeout))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str, timeout: Option<Duration>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, resource: &str) -> String {
        format!("{}/explorer/{resource}", self.base_url)
    }

    fn get(&self, resource: &str, query: &[(&str, String)]) -> reqwest::RequestBuilder {
        let rb = self.client.get(self.url(resource));
        if query.is_empty() {
            rb
        } else {
            rb.query(query)
        }
    }

    fn post<B: Serialize + ?Sized>(&self, resource: &str, body: &B) -> reqwest::RequestBuilder {
        self.client.post(self.url(resource)).json(body)
    }

    /// Send one request. `Ok(None)` means an empty or `null` body, or a 404 when `missing_ok`.
    async fn execute(
        &self,
        resource: &'static str,
        rb: reqwest::RequestBuilder,
        missing_ok: bool,
    ) -> RequestResult<Option<String>> {
        let rb = match self.timeout {
            Some(t) => rb.timeout(t),
            None => rb,
        };
        log::debug!("📡 {resource}");

        let res = rb.send().await.map_err(|e| fail(resource, e))?;
        let status = res.status();
        if missing_ok && status == StatusCode::NOT_FOUND {
            log::debug!("{resource}: not found");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(fail(resource, RequestCause::Status(status.as_u16())));
        }

        let text = res.text().await.map_err(|e| fail(resource, e))?;
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed == "null" {
            Ok(None)
        } else {
            Ok(Some(text))
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        query: &[(&str, String)],
        missing_ok: bool,
    ) -> RequestResult<Option<T>> {
        match self.execute(resource, self.get(resource, query), missing_ok).await? {
            Some(text) => decode(resource, &text).map(Some),
            None => Ok(None),
        }
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        query: &[(&str, String)],
    ) -> RequestResult<Vec<T>> {
        Ok(self.get_json(resource, query, false).await?.unwrap_or_default())
    }

    async fn get_scalar(&self, resource: &'static str) -> RequestResult<String> {
        let body = self.execute(resource, self.get(resource, &[]), false).await?;
        Ok(body.map(scalar_text).unwrap_or_else(|| "0".to_string()))
    }

    async fn post_ack<B: Serialize + Sync + ?Sized>(
        &self,
        resource: &'static str,
        body: &B,
        default_ack: &str,
    ) -> RequestResult<String> {
        let reply = self.execute(resource, self.post(resource, body), false).await?;
        Ok(reply
            .map(scalar_text)
            .unwrap_or_else(|| default_ack.to_string()))
    }
}

fn fail(resource: &'static str, cause: impl Into<RequestCause>) -> RequestError {
    let err = RequestError::new(resource, cause);
    log::error!("❌ Error fetching {resource}: {}", err.cause);
    err
}

fn decode<T: DeserializeOwned>(resource: &'static str, text: &str) -> RequestResult<T> {
    serde_json::from_str(text).map_err(|e| fail(resource, e))
}

/// Scalars and acks come back either as a JSON string or as plain text.
fn scalar_text(body: String) -> String {
    match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(serde_json::Value::Number(n)) => n.to_string(),
        _ => body.trim().to_string(),
    }
}

#[async_trait]
impl ExplorerApi for HttpGateway {
    async fn get_blocks(&self, limit: Option<u32>) -> RequestResult<Vec<Block>> {
        let query: Vec<(&str, String)> = limit
            .map(|n| vec![("limit", n.to_string())])
            .unwrap_or_default();
        self.get_list("getBlocks", &query).await
    }

    async fn get_block(&self, height: u64) -> RequestResult<Option<Block>> {
        self.get_json("getBlock", &[("index", height.to_string())], true)
            .await
    }

    async fn get_wallet_balances(&self) -> RequestResult<Vec<WalletBalance>> {
        self.get_list("walletBalances", &[]).await
    }

    async fn get_stored_files(&self) -> RequestResult<Vec<String>> {
        self.get_list("storedFiles", &[]).await
    }

    async fn get_storage_contracts(&self, file_name: &str) -> RequestResult<Vec<StorageContract>> {
        self.get_list("storageContracts", &[("fileName", file_name.to_string())])
            .await
    }

    async fn get_storage_contracts_chunk(
        &self,
        file_name: &str,
        offset: u64,
        limit: u64,
    ) -> RequestResult<Vec<StorageContract>> {
        self.get_list(
            "storageContractsChunk",
            &[
                ("fileName", file_name.to_string()),
                ("offset", offset.to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    async fn send_transaction(&self, tx: &Transaction) -> RequestResult<String> {
        self.post_ack("transactions", tx, DEFAULT_TX_ACK).await
    }

    async fn send_block(&self, block: &Block) -> RequestResult<String> {
        self.post_ack("blocks", block, DEFAULT_BLOCK_ACK).await
    }

    async fn archive_file(
        &self,
        file: serde_json::Value,
        data: serde_json::Value,
    ) -> RequestResult<String> {
        let payload = ArchivePayload { file, data };
        self.post_ack("archive", &payload, DEFAULT_ARCHIVE_ACK).await
    }

    async fn get_mined_coins(&self) -> RequestResult<BTreeMap<String, String>> {
        // Amounts may be numbers on the wire
        let raw: Option<BTreeMap<String, serde_json::Value>> =
            self.get_json("minedCoins", &[], false).await?;
        Ok(raw
            .unwrap_or_default()
            .into_iter()
            .map(|(addr, v)| {
                let amount = match v {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                (addr, amount)
            })
            .collect())
    }

    async fn get_archived_storage(&self) -> RequestResult<String> {
        self.get_scalar("archivedStorage").await
    }

    async fn get_total_amount_of_contracts(&self) -> RequestResult<String> {
        self.get_scalar("totalAmountOfContracts").await
    }

    async fn get_total_amount_of_coins(&self) -> RequestResult<String> {
        self.get_scalar("totalAmountOfCoins").await
    }

    async fn get_storers_of_file(&self, file_name: &str) -> RequestResult<Vec<String>> {
        self.get_list("storersOfFile", &[("fileName", file_name.to_string())])
            .await
    }

    async fn get_storage_hash(
        &self,
        file_url: &str,
        storer: &str,
    ) -> RequestResult<Option<String>> {
        let query = [
            ("fileUrl", file_url.to_string()),
            ("storerAddress", storer.to_string()),
        ];
        let body = self
            .execute(
                "storageHashFileAndAddress",
                self.get("storageHashFileAndAddress", &query),
                true,
            )
            .await?;
        Ok(body.map(scalar_text).filter(|h| !h.is_empty()))
    }

    async fn get_storage_contract(
        &self,
        contract_hash: &str,
        file_url: &str,
    ) -> RequestResult<Option<StorageContract>> {
        self.get_json(
            "storageContract",
            &[
                ("contractHash", contract_hash.to_string()),
                ("fileUrl", file_url.to_string()),
            ],
            true,
        )
        .await
    }

    async fn get_contract_file_proving_windows(
        &self,
        contract_hash: &str,
    ) -> RequestResult<Vec<FileProvingWindow>> {
        let mut windows: Vec<FileProvingWindow> = self
            .get_list(
                "contractFileProvingWindows",
                &[("contractHash", contract_hash.to_string())],
            )
            .await?;
        for w in windows.iter_mut().filter(|w| w.contract_hash.is_empty()) {
            w.contract_hash = contract_hash.to_string();
        }
        Ok(windows)
    }
}
