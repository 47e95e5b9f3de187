mod common;

use common::{block, FakeApi};
use std::collections::VecDeque;
use std::sync::Mutex;
use storx::commands::run_command;
use storx::config::Command;
use storx::types::{FileProvingWindow, ProvingState, StorageContract, WalletBalance};

async fn run(api: &FakeApi, cmd: Command) -> anyhow::Result<String> {
    let mut out = Vec::new();
    run_command(api, cmd, &mut out).await?;
    Ok(String::from_utf8(out).unwrap())
}

fn contract(storer: &str, file_url: &str) -> StorageContract {
    StorageContract {
        file_url: file_url.into(),
        storer_address: storer.into(),
        merkle_root: "root".into(),
        timestamp: 0,
        value: "10".into(),
        proof_frequency: 5,
        window_size: 2,
        file_length: 1500,
        storage_type: "ARCHIVE".into(),
        fccn_signature: None,
        storer_signature: None,
    }
}

#[tokio::test]
async fn blocks_prints_newest_first() {
    let api = FakeApi {
        block_pages: Mutex::new(VecDeque::from([Ok(vec![
            block(7, &[]),
            block(9, &["t1", "t2"]),
            block(8, &[]),
        ])])),
        ..Default::default()
    };
    let out = run(&api, Command::Blocks { limit: 3 }).await.unwrap();
    let rows: Vec<&str> = out.lines().skip(1).collect();
    assert_eq!(rows.len(), 3);
    assert!(rows[0].trim_start().starts_with('9'));
    assert!(rows[0].trim_end().ends_with('2'));
    assert!(rows[2].trim_start().starts_with('7'));
    assert_eq!(api.limits(), vec![Some(3)]);
}

#[tokio::test]
async fn missing_block_is_an_error() {
    let api = FakeApi::default();
    let err = run(&api, Command::Block { height: 4 }).await.unwrap_err();
    assert_eq!(err.to_string(), "block #4 not found");
}

#[tokio::test]
async fn contracts_page_through_chunks() {
    let mut api = FakeApi::default();
    api.contracts.insert("h1".into(), contract("s1", "f.html"));
    api.contracts.insert("h2".into(), contract("s2", "f.html"));
    api.contracts.insert("h3".into(), contract("s3", "other.html"));

    let all = run(
        &api,
        Command::Contracts {
            file_name: "f.html".into(),
            offset: None,
            limit: 20,
        },
    )
    .await
    .unwrap();
    assert!(all.ends_with("2 contracts\n"));
    assert!(all.contains("1.50 KB"));

    let chunk = run(
        &api,
        Command::Contracts {
            file_name: "f.html".into(),
            offset: Some(1),
            limit: 20,
        },
    )
    .await
    .unwrap();
    assert!(chunk.ends_with("1 contracts\n"));
}

fn window(start: u64, end: u64, state: ProvingState) -> FileProvingWindow {
    FileProvingWindow {
        contract_hash: "h1".into(),
        po_dp_challenge: "c".into(),
        start_block_index: start,
        end_block_index: end,
        state,
    }
}

#[tokio::test]
async fn contract_lists_only_well_formed_windows() {
    let mut api = FakeApi::default();
    let mut big = contract("s1", "f.html");
    big.file_length = u64::MAX;
    api.contracts.insert("h1".into(), big);
    api.windows.insert(
        "h1".into(),
        vec![
            window(10, 20, ProvingState::Proved),
            window(30, 25, ProvingState::Pending),
        ],
    );

    let out = run(
        &api,
        Command::Contract {
            contract_hash: "h1".into(),
            file_url: "f.html".into(),
        },
    )
    .await
    .unwrap();
    assert!(out.contains("File length:     18446744.07 TB"));
    assert!(out.contains("Proving windows: 1\n"));
    assert!(out.contains("PROVED"));
    assert!(!out.contains("PENDING"));
}

#[tokio::test]
async fn wallet_joins_balance_and_mined_coins() {
    let mut api = FakeApi::default();
    api.balances = vec![WalletBalance {
        address: "w1".into(),
        balance: "42".into(),
    }];
    api.mined.insert("w1".into(), "7".into());

    let out = run(
        &api,
        Command::Wallet {
            address: "w1".into(),
        },
    )
    .await
    .unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["balance"], "42");
    assert_eq!(json["mined"], "7");

    let err = run(
        &api,
        Command::Wallet {
            address: "nobody".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(err.to_string().contains("nobody"));
}

#[tokio::test]
async fn submit_reads_transaction_file() {
    let dir = std::env::temp_dir().join(format!("storx-cmd-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("tx.json");
    std::fs::write(&path, r#"{"transactionId":"t1","type":"TRANSFER","amount":3}"#).unwrap();

    let api = FakeApi::default();
    let out = run(&api, Command::SubmitTx { path: path.clone() }).await.unwrap();
    assert_eq!(out, "Transaction accepted\n");

    std::fs::write(&path, "not json").unwrap();
    let err = run(&api, Command::SubmitTx { path }).await.unwrap_err();
    assert!(err.to_string().starts_with("Invalid JSON"));
    let _ = std::fs::remove_dir_all(dir);
}
