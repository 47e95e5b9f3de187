//! One-shot subcommands: query the explorer API, print, exit.
//!
//! Output goes to any [`Write`] so the commands can be checked without a terminal.
//! Unlike the terminal UI, gateway errors propagate here and end the process
//! with a non-zero status.

use crate::config::Command;
use crate::gateway::ExplorerApi;
use crate::resolvers;
use crate::stored_files;
use crate::summary;
use crate::types::{ArchivePayload, Block, Transaction};
use crate::util_text::{format_epoch_ms, format_file_length, short_hash};
use anyhow::{anyhow, Context, Result};
use std::io::Write;
use std::path::Path;

pub async fn run_command(api: &dyn ExplorerApi, cmd: Command, out: &mut impl Write) -> Result<()> {
    match cmd {
        Command::Blocks { limit } => {
            let mut blocks = api.get_blocks(Some(limit)).await?;
            blocks.sort_by(|a, b| b.height.cmp(&a.height));
            writeln!(out, "{:>10}  {:<14} {:>5}", "HEIGHT", "HASH", "TXS")?;
            for b in &blocks {
                writeln!(
                    out,
                    "{:>10}  {:<14} {:>5}",
                    b.height,
                    short_hash(&b.hash),
                    b.transactions.len()
                )?;
            }
        }
        Command::Block { height } => {
            let block = api
                .get_block(height)
                .await?
                .ok_or_else(|| anyhow!("block #{height} not found"))?;
            writeln!(out, "{}", serde_json::to_string_pretty(&block)?)?;
        }
        Command::Contract {
            contract_hash,
            file_url,
        } => {
            let contract = api
                .get_storage_contract(&contract_hash, &file_url)
                .await?
                .ok_or_else(|| anyhow!("storage contract {contract_hash} not found"))?;
            let windows = api.get_contract_file_proving_windows(&contract_hash).await?;
            writeln!(out, "File:            {}", contract.file_url)?;
            writeln!(out, "Storer:          {}", contract.storer_address)?;
            writeln!(out, "Merkle root:     {}", contract.merkle_root)?;
            writeln!(out, "Created:         {}", format_epoch_ms(contract.timestamp))?;
            writeln!(out, "Value:           {}", contract.value)?;
            writeln!(out, "Proof frequency: {} blocks", contract.proof_frequency)?;
            writeln!(out, "Window size:     {} blocks", contract.window_size)?;
            writeln!(
                out,
                "File length:     {}",
                format_file_length(contract.file_length)
            )?;
            writeln!(out, "Storage type:    {}", contract.storage_type)?;
            let windows: Vec<_> = windows.into_iter().filter(|w| w.is_well_formed()).collect();
            writeln!(out, "Proving windows: {}", windows.len())?;
            for w in &windows {
                writeln!(
                    out,
                    "  {:>8}..{:<8} {}",
                    w.start_block_index, w.end_block_index, w.state
                )?;
            }
        }
        Command::Files => {
            let files = stored_files::resolve_stored_files(api).await?;
            writeln!(out, "{:<20} {:>7}  TITLE", "DATE", "STORERS")?;
            for file in &files {
                writeln!(
                    out,
                    "{:<20} {:>7}  {}",
                    file.date_time,
                    file.storer_count(),
                    file.title()
                )?;
            }
        }
        Command::Contracts {
            file_name,
            offset,
            limit,
        } => {
            let contracts = match offset {
                Some(offset) => {
                    api.get_storage_contracts_chunk(&file_name, offset, limit)
                        .await?
                }
                None => api.get_storage_contracts(&file_name).await?,
            };
            for c in &contracts {
                writeln!(
                    out,
                    "{:<44} {:>12} {}",
                    c.storer_address,
                    c.value,
                    format_file_length(c.file_length)
                )?;
            }
            writeln!(out, "{} contracts", contracts.len())?;
        }
        Command::Wallets => {
            let (balances, mined) =
                futures::join!(api.get_wallet_balances(), api.get_mined_coins());
            let (balances, mined) = (balances?, mined?);
            for w in &balances {
                let mined = mined.get(&w.address).map(String::as_str).unwrap_or("0");
                writeln!(out, "{:<44} {:>16} {:>16}", w.address, w.balance, mined)?;
            }
        }
        Command::Wallet { address } => {
            let detail = resolvers::resolve_wallet(api, &address).await;
            let balance = detail
                .balance
                .ok_or_else(|| anyhow!("wallet {address} not found"))?;
            let json = serde_json::json!({
                "address": balance.address,
                "balance": balance.balance,
                "mined": detail.mined.unwrap_or_else(|| "0".into()),
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&json)?)?;
        }
        Command::Summary => {
            let s = summary::fetch_summary(api).await;
            writeln!(out, "Archived storage: {}", s.archived_storage)?;
            writeln!(out, "Total contracts:  {}", s.total_contracts)?;
            writeln!(out, "Total coins:      {}", s.total_coins)?;
        }
        Command::SubmitTx { path } => {
            let tx: Transaction = read_json(&path)?;
            writeln!(out, "{}", api.send_transaction(&tx).await?)?;
        }
        Command::SubmitBlock { path } => {
            let block: Block = read_json(&path)?;
            writeln!(out, "{}", api.send_block(&block).await?)?;
        }
        Command::Archive { path } => {
            let payload: ArchivePayload = read_json(&path)?;
            writeln!(out, "{}", api.archive_file(payload.file, payload.data).await?)?;
        }
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", path.display()))
}
