//! storx - storage network explorer
//!
//! This library provides the core of storx, a terminal explorer for a
//! storage-contract blockchain: blocks, wallets, stored files and the storage
//! contracts that bind a file to a storer.
//!
//! ## Architecture
//!
//! - [`gateway`]: typed access to the explorer HTTP API ([`gateway::ExplorerApi`])
//! - [`poller`] and [`chain`]: the block feed and the ordered block collection it merges into
//! - [`filter`], [`stored_files`], [`resolvers`], [`summary`]: projections and per-page lookups
//! - [`app`] and [`ui`]: view state and ratatui rendering, driven by [`types::AppEvent`]s
//!
//! The UI loop owns all view state. Background tasks only send events.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -- --backend-url http://localhost:8080
//! cargo run -- blocks --limit 5
//! ```

// Core modules
pub mod config;
pub mod error;
pub mod types;
pub mod util_text;

// Theme system
pub mod theme;

// Explorer API access
pub mod gateway;

// Block feed
pub mod chain;
pub mod poller;
pub mod signal;

// Projections and page lookups
pub mod filter;
pub mod resolvers;
pub mod stored_files;
pub mod summary;

// Background request executor
pub mod fetcher;

// One-shot subcommands
pub mod commands;

// Page routes
pub mod router;

pub mod app;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use error::{RequestError, RequestResult};
pub use gateway::{ExplorerApi, HttpGateway};
pub use types::AppEvent;
