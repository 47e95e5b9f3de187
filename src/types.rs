use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A block as served by `/explorer/getBlocks` and `/explorer/getBlock`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub height: u64,
    pub hash: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub transactions: Vec<Transaction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default)]
    pub transaction_id: String,
    #[serde(rename = "type", default)]
    pub tx_type: String,
    // Remaining server fields, kept so a transaction can be re-submitted as-is
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Transaction {
    pub fn new(transaction_id: impl Into<String>, tx_type: impl Into<String>) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            tx_type: tx_type.into(),
            extra: BTreeMap::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WalletBalance {
    pub address: String,
    #[serde(deserialize_with = "amount_text")]
    pub balance: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageContract {
    pub file_url: String,
    pub storer_address: String,
    #[serde(default)]
    pub merkle_root: String,
    /// Epoch milliseconds
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default, deserialize_with = "amount_text")]
    pub value: String,
    /// In blocks
    #[serde(default)]
    pub proof_frequency: u64,
    /// In blocks
    #[serde(default)]
    pub window_size: u64,
    /// In bytes
    #[serde(default)]
    pub file_length: u64,
    #[serde(default)]
    pub storage_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fccn_signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storer_signature: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProvingState {
    Pending,
    Proving,
    Proved,
    Failed,
}

impl std::fmt::Display for ProvingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProvingState::Pending => write!(f, "PENDING"),
            ProvingState::Proving => write!(f, "PROVING"),
            ProvingState::Proved => write!(f, "PROVED"),
            ProvingState::Failed => write!(f, "FAILED"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileProvingWindow {
    #[serde(default)]
    pub contract_hash: String,
    #[serde(default)]
    pub po_dp_challenge: String,
    pub start_block_index: u64,
    pub end_block_index: u64,
    pub state: ProvingState,
}

impl FileProvingWindow {
    pub fn is_well_formed(&self) -> bool {
        self.start_block_index <= self.end_block_index
    }
}

/// Body of `POST /explorer/archive`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArchivePayload {
    pub file: serde_json::Value,
    pub data: serde_json::Value,
}

/// Network-wide figures shown in the header. Always populated, zero on failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkSummary {
    pub archived_storage: String,
    pub total_contracts: String,
    pub total_coins: String,
}

impl Default for NetworkSummary {
    fn default() -> Self {
        Self {
            archived_storage: "0".into(),
            total_contracts: "0".into(),
            total_coins: "0".into(),
        }
    }
}

/// Everything background tasks hand to the UI loop. Page data carries the
/// navigation epoch it was requested under.
#[derive(Clone, Debug)]
pub enum AppEvent {
    ExplorerLoaded {
        epoch: u64,
        blocks: Vec<Block>,
    },
    LatestBlocks {
        epoch: u64,
        blocks: Vec<Block>,
    },
    PollState {
        epoch: u64,
        state: crate::poller::PollState,
    },
    OlderBlock {
        epoch: u64,
        height: u64,
        block: Option<Block>,
    },
    StoredFilesLoaded {
        epoch: u64,
        files: Vec<crate::stored_files::StoredFileSummary>,
    },
    WalletsLoaded {
        epoch: u64,
        balances: Vec<WalletBalance>,
        mined: BTreeMap<String, String>,
    },
    BlockResolved {
        epoch: u64,
        block: Option<Block>,
    },
    ContractResolved {
        epoch: u64,
        detail: crate::resolvers::ContractDetail,
    },
    WalletResolved {
        epoch: u64,
        detail: crate::resolvers::WalletDetail,
    },
    ContractHashResolved {
        epoch: u64,
        file_url: String,
        storer: String,
        hash: Option<String>,
    },
    SummaryLoaded(NetworkSummary),
    Quit,
}

impl AppEvent {
    /// Navigation epoch of page-scoped events; `None` for global ones.
    pub fn epoch(&self) -> Option<u64> {
        match self {
            AppEvent::ExplorerLoaded { epoch, .. }
            | AppEvent::LatestBlocks { epoch, .. }
            | AppEvent::OlderBlock { epoch, .. }
            | AppEvent::StoredFilesLoaded { epoch, .. }
            | AppEvent::WalletsLoaded { epoch, .. }
            | AppEvent::BlockResolved { epoch, .. }
            | AppEvent::ContractResolved { epoch, .. }
            | AppEvent::WalletResolved { epoch, .. }
            | AppEvent::ContractHashResolved { epoch, .. }
            | AppEvent::PollState { epoch, .. } => Some(*epoch),
            AppEvent::SummaryLoaded(_) | AppEvent::Quit => None,
        }
    }
}

/// Amounts arrive as either JSON numbers or strings; both are kept as text.
fn amount_text<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    match serde_json::Value::deserialize(de)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok("0".to_string()),
        other => Err(D::Error::custom(format!("expected amount, got {other}"))),
    }
}

fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}
