use crate::poller::PollSettings;
use crate::theme::Theme;
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// storx - storage network explorer
///
/// Terminal explorer for blocks, wallets, stored files and storage contracts.
/// Configuration priority: CLI args > Environment variables > Defaults
#[derive(Parser, Debug)]
#[command(name = "storx")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Storage network explorer", long_about = None)]
pub struct CliArgs {
    /// Explorer API base URL
    #[arg(long, env = "BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Block polling interval in milliseconds (1000-600000)
    #[arg(long, env = "POLL_INTERVAL_MS")]
    pub poll_interval_ms: Option<u64>,

    /// Newest blocks requested per poll (1-50)
    #[arg(long, env = "POLL_BATCH")]
    pub poll_batch: Option<u32>,

    /// Blocks loaded when the explorer opens (1-500)
    #[arg(long, env = "INITIAL_BLOCKS")]
    pub initial_blocks: Option<u32>,

    /// How long new blocks stay highlighted, in milliseconds (0-10000)
    #[arg(long, env = "ANIMATION_SETTLE_MS")]
    pub animation_settle_ms: Option<u64>,

    /// Per-request timeout in milliseconds (500-120000). Unset = transport default
    #[arg(long, env = "REQUEST_TIMEOUT_MS")]
    pub request_timeout_ms: Option<u64>,

    /// Target UI rendering FPS (1-120)
    #[arg(long, env = "RENDER_FPS")]
    pub render_fps: Option<u32>,

    /// Color theme: dark, light
    #[arg(long, env = "THEME")]
    pub theme: Option<String>,

    /// Log file used while the terminal UI is running
    #[arg(long, env = "STORX_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Page to open, e.g. storx://blocks/42
    pub route: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// One-shot commands. Without one, the terminal UI starts.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the newest blocks
    Blocks {
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Print one block as JSON
    Block { height: u64 },
    /// Print a storage contract and its proving windows
    Contract {
        contract_hash: String,
        file_url: String,
    },
    /// Print stored files with their storer counts
    Files,
    /// Print the storage contracts of a file, optionally one page at a time
    Contracts {
        file_name: String,
        #[arg(long)]
        offset: Option<u64>,
        #[arg(long, default_value_t = 20)]
        limit: u64,
    },
    /// Print wallet balances with mined amounts
    Wallets,
    /// Print one wallet as JSON
    Wallet { address: String },
    /// Print network totals
    Summary,
    /// Submit a transaction read from a JSON file
    SubmitTx { path: PathBuf },
    /// Submit a block read from a JSON file
    SubmitBlock { path: PathBuf },
    /// Archive a file
    Archive { path: PathBuf },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub backend_url: String,
    pub poll_interval_ms: u64,
    pub poll_batch: u32,
    pub initial_blocks: u32,
    pub animation_settle_ms: u64,
    pub request_timeout_ms: Option<u64>,
    pub render_fps: u32,
    pub theme: Theme,
    pub log_file: PathBuf,
    pub route: Option<String>,
    pub command: Option<Command>,
}

impl Config {
    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            interval: Duration::from_millis(self.poll_interval_ms),
            batch: self.poll_batch,
            initial_limit: self.initial_blocks,
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    pub fn animation_settle(&self) -> Duration {
        Duration::from_millis(self.animation_settle_ms)
    }
}

/// Validate that a value is within a given range (inclusive)
fn validate_in_range<T>(val: T, min: T, max: T, name: &str) -> Result<T>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if val < min || val > max {
        Err(anyhow!("{name} must be in range [{min}, {max}], got {val}"))
    } else {
        Ok(val)
    }
}

/// Validate URL format (basic check)
fn validate_url(url: &str, name: &str) -> Result<()> {
    if url.is_empty() {
        return Err(anyhow!("{name} cannot be empty"));
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(anyhow!("{name} must start with http:// or https://"))
    }
}

/// Load configuration from CLI args and environment variables
pub fn load() -> Result<Config> {
    from_args(CliArgs::parse())
}

/// Build a validated [`Config`]. clap has already folded environment variables in.
pub fn from_args(args: CliArgs) -> Result<Config> {
    let backend_url = args
        .backend_url
        .unwrap_or_else(|| "http://localhost:8080".to_string());
    validate_url(&backend_url, "BACKEND_URL")?;

    let poll_interval_ms = validate_in_range(
        args.poll_interval_ms.unwrap_or(15_000),
        1_000,
        600_000,
        "POLL_INTERVAL_MS",
    )?;
    let poll_batch = validate_in_range(args.poll_batch.unwrap_or(3), 1, 50, "POLL_BATCH")?;
    let initial_blocks =
        validate_in_range(args.initial_blocks.unwrap_or(10), 1, 500, "INITIAL_BLOCKS")?;
    let animation_settle_ms = validate_in_range(
        args.animation_settle_ms.unwrap_or(600),
        0,
        10_000,
        "ANIMATION_SETTLE_MS",
    )?;
    let request_timeout_ms = args
        .request_timeout_ms
        .map(|t| validate_in_range(t, 500, 120_000, "REQUEST_TIMEOUT_MS"))
        .transpose()?;
    let render_fps = validate_in_range(args.render_fps.unwrap_or(30), 1, 120, "RENDER_FPS")?;

    let theme = match args.theme.as_deref() {
        Some(name) => Theme::from_str(name).map_err(|e| anyhow!(e))?,
        None => Theme::default(),
    };

    Ok(Config {
        backend_url,
        poll_interval_ms,
        poll_batch,
        initial_blocks,
        animation_settle_ms,
        request_timeout_ms,
        render_fps,
        theme,
        log_file: args.log_file.unwrap_or_else(|| PathBuf::from("./storx.log")),
        route: args.route,
        command: args.command,
    })
}

impl Config {
    /// Print current configuration (useful for debugging)
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Backend URL: {}", self.backend_url),
            format!("Poll Interval: {}ms", self.poll_interval_ms),
            format!("Poll Batch: {} blocks", self.poll_batch),
            format!("Initial Blocks: {}", self.initial_blocks),
            format!("Render FPS: {}", self.render_fps),
            format!("Theme: {}", self.theme),
        ];
        if let Some(t) = self.request_timeout_ms {
            lines.push(format!("Request Timeout: {t}ms"));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config> {
        let mut argv = vec!["storx"];
        argv.extend_from_slice(args);
        from_args(CliArgs::try_parse_from(argv)?)
    }

    #[test]
    fn defaults_match_reference_behavior() {
        let cfg = parse(&["--backend-url", "http://api.local"]).unwrap();
        assert_eq!(cfg.poll_interval_ms, 15_000);
        assert_eq!(cfg.poll_batch, 3);
        assert_eq!(cfg.initial_blocks, 10);
        assert_eq!(cfg.animation_settle_ms, 600);
        assert_eq!(cfg.request_timeout_ms, None);
        assert!(cfg.command.is_none());
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(parse(&["--backend-url", "http://a", "--poll-interval-ms", "10"]).is_err());
        assert!(parse(&["--backend-url", "http://a", "--poll-batch", "0"]).is_err());
        assert!(parse(&["--backend-url", "http://a", "--request-timeout-ms", "1"]).is_err());
    }

    #[test]
    fn rejects_non_http_backend() {
        assert!(parse(&["--backend-url", "ftp://a"]).is_err());
    }

    #[test]
    fn parses_subcommands_and_route() {
        let cfg = parse(&["--backend-url", "http://a", "blocks", "--limit", "4"]).unwrap();
        assert_eq!(cfg.command, Some(Command::Blocks { limit: 4 }));

        let cfg = parse(&["--backend-url", "http://a", "storx://blocks/3"]).unwrap();
        assert_eq!(cfg.route.as_deref(), Some("storx://blocks/3"));
    }
}
