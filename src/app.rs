use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedSender;

use crate::chain::BlockCollection;
use crate::fetcher::FetchRequest;
use crate::filter::{self, SortDirection, ToggleSort};
use crate::poller::PollState;
use crate::resolvers::{ContractDetail, WalletDetail};
use crate::router::Route;
use crate::signal::{self, PendingVisual};
use crate::stored_files::StoredFileSummary;
use crate::theme::Theme;
use crate::types::{AppEvent, Block, NetworkSummary, Transaction, WalletBalance};

/// Distance from the end of the block strip at which the next older block is requested.
pub const LOAD_OLDER_THRESHOLD: usize = 2;

const MAX_LOG_ENTRIES: usize = 50;
const TOAST_DURATION: Duration = Duration::from_secs(2);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Filter,
}

/// Page data that arrives asynchronously.
#[derive(Clone, Debug, PartialEq)]
pub enum Loadable<T> {
    Loading,
    Ready(T),
}

impl<T> Loadable<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(v) => Some(v),
            Loadable::Loading => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }
}

fn clamp(sel: usize, len: usize) -> usize {
    sel.min(len.saturating_sub(1))
}

// ----- explorer -----

/// Block strip plus recent transactions. `displayed` and `recent` are
/// projections, rebuilt from `blocks` whenever it or the filter changes.
#[derive(Debug)]
pub struct ExplorerView {
    blocks: BlockCollection,
    displayed: Vec<Block>,
    recent: Vec<Transaction>,
    loaded: bool,
    poll_state: PollState,
    sel_block: usize,
    sel_tx: usize,
    new_blocks: Option<PendingVisual<u64>>,
    new_txs: Option<PendingVisual<String>>,
    loading_older: bool,
}

impl ExplorerView {
    fn new() -> Self {
        Self {
            blocks: BlockCollection::new(),
            displayed: Vec::new(),
            recent: Vec::new(),
            loaded: false,
            poll_state: PollState::Idle,
            sel_block: 0,
            sel_tx: 0,
            new_blocks: None,
            new_txs: None,
            loading_older: false,
        }
    }

    pub fn blocks(&self) -> &BlockCollection {
        &self.blocks
    }
    pub fn displayed(&self) -> &[Block] {
        &self.displayed
    }
    pub fn recent(&self) -> &[Transaction] {
        &self.recent
    }
    pub fn loaded(&self) -> bool {
        self.loaded
    }
    pub fn poll_state(&self) -> PollState {
        self.poll_state
    }
    pub fn sel_block(&self) -> usize {
        self.sel_block
    }
    pub fn sel_tx(&self) -> usize {
        self.sel_tx
    }
    pub fn loading_older(&self) -> bool {
        self.loading_older
    }

    pub fn is_new_block(&self, height: u64, now: Instant) -> bool {
        self.new_blocks.as_ref().is_some_and(|v| v.covers(&height, now))
    }

    pub fn is_new_tx(&self, id: &str, now: Instant) -> bool {
        self.new_txs
            .as_ref()
            .is_some_and(|v| v.covers(&id.to_string(), now))
    }

    pub fn new_blocks(&self) -> Option<&PendingVisual<u64>> {
        self.new_blocks.as_ref()
    }

    pub fn new_txs(&self) -> Option<&PendingVisual<String>> {
        self.new_txs.as_ref()
    }

    fn selected_block(&self) -> Option<&Block> {
        self.displayed.get(self.sel_block)
    }

    /// Rebuild projections, keeping the selected block selected when it survives.
    fn reproject(&mut self, term: &str) {
        let keep = self.selected_block().map(|b| b.height);
        self.displayed = filter::text_filter(self.blocks.as_slice(), term);
        self.recent = filter::recent_transactions(&self.displayed);
        self.sel_block = keep
            .and_then(|h| self.displayed.iter().position(|b| b.height == h))
            .unwrap_or_else(|| clamp(self.sel_block, self.displayed.len()));
        self.sel_tx = clamp(self.sel_tx, self.recent.len());
    }

    fn load(&mut self, blocks: Vec<Block>, term: &str) {
        self.blocks = BlockCollection::from_blocks(blocks);
        self.loaded = true;
        self.sel_block = 0;
        self.sel_tx = 0;
        self.reproject(term);
    }

    /// Merge one poll result and raise entrance signals. Returns inserted heights.
    fn merge(&mut self, batch: Vec<Block>, term: &str, now: Instant, settle: Duration) -> Vec<u64> {
        let outcome = self.blocks.merge_latest(batch);
        let before: Vec<String> = self.recent.iter().map(|t| t.transaction_id.clone()).collect();
        self.reproject(term);

        if outcome.any() {
            self.new_blocks = Some(PendingVisual::new(outcome.inserted.clone(), now, settle));
        }
        if self.recent.len() > before.len() {
            let fresh: Vec<String> = self
                .recent
                .iter()
                .map(|t| t.transaction_id.clone())
                .filter(|id| !before.contains(id))
                .collect();
            self.new_txs = Some(PendingVisual::new(fresh, now, settle));
        }
        outcome.inserted
    }
}

// ----- stored files -----

/// Storers of one file, opened over the stored-files table.
#[derive(Clone, Debug, PartialEq)]
pub struct StorersDialog {
    pub file_url: String,
    pub title: String,
    pub storers: Vec<String>,
    pub sel: usize,
    /// Contract hash lookup in flight
    pub resolving: bool,
}

impl StorersDialog {
    pub fn selected(&self) -> Option<&str> {
        self.storers.get(self.sel).map(String::as_str)
    }
}

#[derive(Debug, Default)]
pub struct StoredFilesView {
    files: Vec<StoredFileSummary>,
    displayed: Vec<StoredFileSummary>,
    loaded: bool,
    sort: ToggleSort,
    sel: usize,
    dialog: Option<StorersDialog>,
}

impl StoredFilesView {
    pub fn files(&self) -> &[StoredFileSummary] {
        &self.files
    }
    pub fn displayed(&self) -> &[StoredFileSummary] {
        &self.displayed
    }
    pub fn loaded(&self) -> bool {
        self.loaded
    }
    pub fn sel(&self) -> usize {
        self.sel
    }
    pub fn sort_direction(&self) -> Option<SortDirection> {
        self.sort.last()
    }
    pub fn dialog(&self) -> Option<&StorersDialog> {
        self.dialog.as_ref()
    }

    fn reproject(&mut self, term: &str) {
        self.displayed = filter::text_filter(&self.files, term);
        self.sel = clamp(self.sel, self.displayed.len());
    }
}

// ----- wallets -----

#[derive(Debug, Default)]
pub struct WalletsView {
    balances: Vec<WalletBalance>,
    displayed: Vec<WalletBalance>,
    mined: BTreeMap<String, String>,
    loaded: bool,
    sel: usize,
}

impl WalletsView {
    pub fn displayed(&self) -> &[WalletBalance] {
        &self.displayed
    }
    pub fn mined(&self, address: &str) -> Option<&str> {
        self.mined.get(address).map(String::as_str)
    }
    pub fn loaded(&self) -> bool {
        self.loaded
    }
    pub fn sel(&self) -> usize {
        self.sel
    }

    fn reproject(&mut self, term: &str) {
        self.displayed = filter::text_filter(&self.balances, term);
        self.sel = clamp(self.sel, self.displayed.len());
    }
}

// ----- pages -----

#[derive(Debug)]
pub enum Page {
    Explorer(ExplorerView),
    StoredFiles(StoredFilesView),
    Wallets(WalletsView),
    Block {
        height: Option<u64>,
        block: Loadable<Option<Block>>,
        sel_tx: usize,
    },
    /// Resolved at navigation time from the blocks on screen.
    Transaction {
        id: Option<String>,
        found: Option<(Transaction, Block)>,
    },
    Contract {
        contract_hash: Option<String>,
        file_url: Option<String>,
        detail: Loadable<ContractDetail>,
        sel: usize,
    },
    Wallet {
        address: Option<String>,
        detail: Loadable<WalletDetail>,
    },
}

pub struct App {
    quit: bool,
    route: Route,
    page: Page,
    history: Vec<Route>,
    /// Bumped on every page activation; results tagged with an older epoch are dropped.
    epoch: u64,
    pane: usize, // explorer: 0 blocks, 1 txs

    input_mode: InputMode,
    filter_query: String,

    summary: NetworkSummary,
    settle: Duration,
    fps: u32,
    theme: Theme,

    requests: Option<UnboundedSender<FetchRequest>>,
    /// A `StartPolling` was sent and not yet stopped
    polling: bool,

    // Debug log (Ctrl+D)
    debug_log: Vec<String>,
    debug_visible: bool,

    toast_message: Option<(String, Instant)>,
}

impl App {
    pub fn new(
        fps: u32,
        theme: Theme,
        settle: Duration,
        requests: Option<UnboundedSender<FetchRequest>>,
    ) -> Self {
        Self {
            quit: false,
            route: Route::Explorer,
            page: Page::Explorer(ExplorerView::new()),
            history: Vec::new(),
            epoch: 0,
            pane: 0,
            input_mode: InputMode::Normal,
            filter_query: String::new(),
            summary: NetworkSummary::default(),
            settle,
            fps,
            theme,
            requests,
            polling: false,
            debug_log: Vec::new(),
            debug_visible: false,
            toast_message: None,
        }
    }

    /// Open the first page and load the header figures.
    pub fn start(&mut self, route: Route) {
        self.request(FetchRequest::Summary);
        self.activate(route);
    }

    // ----- getters -----
    pub fn fps(&self) -> u32 {
        self.fps
    }
    pub fn theme(&self) -> Theme {
        self.theme
    }
    pub fn quit_flag(&self) -> bool {
        self.quit
    }
    pub fn route(&self) -> &Route {
        &self.route
    }
    pub fn page(&self) -> &Page {
        &self.page
    }
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
    pub fn pane(&self) -> usize {
        self.pane
    }
    pub fn summary(&self) -> &NetworkSummary {
        &self.summary
    }
    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }
    pub fn filter_query(&self) -> &str {
        &self.filter_query
    }
    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }
    pub fn debug_log(&self) -> &[String] {
        &self.debug_log
    }
    pub fn debug_visible(&self) -> bool {
        self.debug_visible
    }

    pub fn explorer(&self) -> Option<&ExplorerView> {
        match &self.page {
            Page::Explorer(v) => Some(v),
            _ => None,
        }
    }

    pub fn stored_files(&self) -> Option<&StoredFilesView> {
        match &self.page {
            Page::StoredFiles(v) => Some(v),
            _ => None,
        }
    }

    pub fn wallets(&self) -> Option<&WalletsView> {
        match &self.page {
            Page::Wallets(v) => Some(v),
            _ => None,
        }
    }

    /// Show a toast notification for 2 seconds
    pub fn show_toast(&mut self, msg: String) {
        self.log_debug(format!("toast: {msg}"));
        self.toast_message = Some((msg, Instant::now()));
    }

    pub fn toast_message(&self) -> Option<&str> {
        self.toast_message.as_ref().and_then(|(msg, time)| {
            if time.elapsed() < TOAST_DURATION {
                Some(msg.as_str())
            } else {
                None
            }
        })
    }

    pub fn log_debug(&mut self, msg: String) {
        log::debug!("{msg}");
        let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
        self.debug_log.push(format!("[{timestamp}] {msg}"));
        if self.debug_log.len() > MAX_LOG_ENTRIES {
            self.debug_log.remove(0);
        }
    }

    pub fn toggle_debug_panel(&mut self) {
        self.debug_visible = !self.debug_visible;
    }

    /// Drop expired entrance signals. Returns true when the screen changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match &mut self.page {
            Page::Explorer(v) => {
                let a = signal::clear_expired(&mut v.new_blocks, now);
                let b = signal::clear_expired(&mut v.new_txs, now);
                a || b
            }
            _ => false,
        }
    }

    fn request(&mut self, req: FetchRequest) {
        let Some(tx) = self.requests.clone() else {
            return;
        };
        if let Err(e) = tx.send(req) {
            self.log_debug(format!("Failed to send fetch request: {e}"));
        }
    }

    // ----- navigation -----
    pub fn navigate(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        self.history.push(self.route.clone());
        self.activate(route);
    }

    pub fn back(&mut self) {
        if let Some(prev) = self.history.pop() {
            self.activate(prev);
        }
    }

    /// Re-enter the current page with fresh data.
    pub fn reload(&mut self) {
        self.request(FetchRequest::Summary);
        self.activate(self.route.clone());
    }

    /// Blocks currently on screen, used to resolve transaction routes.
    fn context_blocks(&self) -> Vec<Block> {
        match &self.page {
            Page::Explorer(v) => v.displayed.clone(),
            Page::Block {
                block: Loadable::Ready(Some(b)),
                ..
            } => vec![b.clone()],
            Page::Transaction {
                found: Some((_, b)), ..
            } => vec![b.clone()],
            _ => Vec::new(),
        }
    }

    fn activate(&mut self, route: Route) {
        let context = self.context_blocks();
        if self.polling {
            self.polling = false;
            self.request(FetchRequest::StopPolling);
        }

        self.epoch += 1;
        let epoch = self.epoch;
        self.pane = 0;
        self.input_mode = InputMode::Normal;
        self.filter_query.clear();
        self.log_debug(format!("navigate {} (epoch {epoch})", route.to_path()));

        let (page, req) = match &route {
            Route::Explorer => (
                Page::Explorer(ExplorerView::new()),
                Some(FetchRequest::StartPolling { epoch }),
            ),
            Route::StoredFiles => (
                Page::StoredFiles(StoredFilesView::default()),
                Some(FetchRequest::StoredFiles { epoch }),
            ),
            Route::Wallets => (
                Page::Wallets(WalletsView::default()),
                Some(FetchRequest::Wallets { epoch }),
            ),
            Route::Block { height } => match height {
                Some(h) => (
                    Page::Block {
                        height: Some(*h),
                        block: Loadable::Loading,
                        sel_tx: 0,
                    },
                    Some(FetchRequest::Block { epoch, height: *h }),
                ),
                None => (
                    Page::Block {
                        height: None,
                        block: Loadable::Ready(None),
                        sel_tx: 0,
                    },
                    None,
                ),
            },
            Route::Transaction { id } => {
                let found = id.as_deref().and_then(|id| {
                    let block = filter::containing_block(&context, id)?;
                    let tx = block.transactions.iter().find(|t| t.transaction_id == id)?;
                    Some((tx.clone(), block.clone()))
                });
                (
                    Page::Transaction {
                        id: id.clone(),
                        found,
                    },
                    None,
                )
            }
            Route::ContractDetails {
                contract_hash,
                file_url,
            } => match (contract_hash, file_url) {
                (Some(h), Some(f)) => (
                    Page::Contract {
                        contract_hash: Some(h.clone()),
                        file_url: Some(f.clone()),
                        detail: Loadable::Loading,
                        sel: 0,
                    },
                    Some(FetchRequest::Contract {
                        epoch,
                        contract_hash: h.clone(),
                        file_url: f.clone(),
                    }),
                ),
                _ => (
                    Page::Contract {
                        contract_hash: contract_hash.clone(),
                        file_url: file_url.clone(),
                        detail: Loadable::Ready(ContractDetail::default()),
                        sel: 0,
                    },
                    None,
                ),
            },
            Route::WalletDetails { address } => match address {
                Some(a) => (
                    Page::Wallet {
                        address: Some(a.clone()),
                        detail: Loadable::Loading,
                    },
                    Some(FetchRequest::Wallet {
                        epoch,
                        address: a.clone(),
                    }),
                ),
                None => (
                    Page::Wallet {
                        address: None,
                        detail: Loadable::Ready(WalletDetail {
                            address: String::new(),
                            balance: None,
                            mined: None,
                        }),
                    },
                    None,
                ),
            },
        };

        self.page = page;
        self.route = route;
        if let Some(req) = req {
            self.polling = matches!(req, FetchRequest::StartPolling { .. });
            self.request(req);
        }
    }

    // ----- events -----
    pub fn on_event(&mut self, ev: AppEvent) {
        self.on_event_at(ev, Instant::now());
    }

    /// [`App::on_event`] with an explicit clock, so entrance signals can be tested.
    pub fn on_event_at(&mut self, ev: AppEvent, now: Instant) {
        if let Some(epoch) = ev.epoch() {
            if epoch != self.epoch {
                self.log_debug(format!("dropping result for epoch {epoch} (now {})", self.epoch));
                return;
            }
        }

        match ev {
            AppEvent::Quit => self.quit = true,
            AppEvent::SummaryLoaded(summary) => self.summary = summary,
            AppEvent::PollState { state, .. } => {
                if let Page::Explorer(v) = &mut self.page {
                    v.poll_state = state;
                }
            }
            AppEvent::ExplorerLoaded { blocks, .. } => {
                if let Page::Explorer(v) = &mut self.page {
                    v.load(blocks, &self.filter_query);
                    let n = v.blocks.len();
                    self.log_debug(format!("explorer loaded {n} blocks"));
                }
            }
            AppEvent::LatestBlocks { blocks, .. } => {
                if let Page::Explorer(v) = &mut self.page {
                    let inserted = v.merge(blocks, &self.filter_query, now, self.settle);
                    if !inserted.is_empty() {
                        self.log_debug(format!("merged new blocks {inserted:?}"));
                    }
                }
            }
            AppEvent::OlderBlock { height, block, .. } => {
                let Page::Explorer(v) = &mut self.page else {
                    return;
                };
                v.loading_older = false;
                let appended = match block {
                    Some(b) => v.blocks.append_older(b),
                    None => false,
                };
                if appended {
                    v.reproject(&self.filter_query);
                }
                self.log_debug(format!("older block #{height}: appended={appended}"));
            }
            AppEvent::StoredFilesLoaded { files, .. } => {
                if let Page::StoredFiles(v) = &mut self.page {
                    v.files = files;
                    v.loaded = true;
                    v.reproject(&self.filter_query);
                }
            }
            AppEvent::WalletsLoaded {
                balances, mined, ..
            } => {
                if let Page::Wallets(v) = &mut self.page {
                    v.balances = balances;
                    v.mined = mined;
                    v.loaded = true;
                    v.reproject(&self.filter_query);
                }
            }
            AppEvent::BlockResolved { block: resolved, .. } => {
                if let Page::Block { block, .. } = &mut self.page {
                    *block = Loadable::Ready(resolved);
                }
            }
            AppEvent::ContractResolved { detail: resolved, .. } => {
                if let Page::Contract { detail, .. } = &mut self.page {
                    *detail = Loadable::Ready(resolved);
                }
            }
            AppEvent::WalletResolved { detail: resolved, .. } => {
                if let Page::Wallet { detail, .. } = &mut self.page {
                    *detail = Loadable::Ready(resolved);
                }
            }
            AppEvent::ContractHashResolved {
                file_url,
                storer,
                hash,
                ..
            } => {
                if let Page::StoredFiles(v) = &mut self.page {
                    if let Some(d) = v.dialog.as_mut() {
                        d.resolving = false;
                    }
                }
                match hash {
                    Some(hash) => self.navigate(Route::ContractDetails {
                        contract_hash: Some(hash),
                        file_url: Some(file_url),
                    }),
                    None => self.show_toast(format!("No storage contract for {storer}")),
                }
            }
        }
    }

    // ----- filter -----
    pub fn start_filter(&mut self) {
        if self.filterable() {
            self.input_mode = InputMode::Filter;
        }
    }

    pub fn clear_filter(&mut self) {
        self.filter_query.clear();
        self.input_mode = InputMode::Normal;
        self.reproject();
    }

    /// Leave filter input, keeping the term.
    pub fn apply_filter(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn filter_add_char(&mut self, ch: char) {
        self.filter_query.push(ch);
        self.reproject();
    }

    pub fn filter_backspace(&mut self) {
        self.filter_query.pop();
        self.reproject();
    }

    fn filterable(&self) -> bool {
        matches!(
            self.page,
            Page::Explorer(_) | Page::StoredFiles(_) | Page::Wallets(_)
        )
    }

    fn reproject(&mut self) {
        let term = &self.filter_query;
        match &mut self.page {
            Page::Explorer(v) => v.reproject(term),
            Page::StoredFiles(v) => v.reproject(term),
            Page::Wallets(v) => v.reproject(term),
            _ => {}
        }
    }

    /// Esc: close the storers dialog first, otherwise drop the filter.
    pub fn escape(&mut self) {
        if let Page::StoredFiles(v) = &mut self.page {
            if v.dialog.take().is_some() {
                return;
            }
        }
        if !self.filter_query.is_empty() || self.input_mode == InputMode::Filter {
            self.clear_filter();
        }
    }

    // ----- stored files -----
    pub fn toggle_sort(&mut self) {
        if let Page::StoredFiles(v) = &mut self.page {
            v.sort.apply(&mut v.files, |f| f.key.created);
            v.reproject(&self.filter_query);
        }
    }

    pub fn open_storers(&mut self) {
        if let Page::StoredFiles(v) = &mut self.page {
            if let Some(file) = v.displayed.get(v.sel) {
                v.dialog = Some(StorersDialog {
                    file_url: file.original_name.clone(),
                    title: file.title().to_string(),
                    storers: file.storers.clone(),
                    sel: 0,
                    resolving: false,
                });
            }
        }
    }

    fn choose_storer(&mut self) {
        let epoch = self.epoch;
        let Page::StoredFiles(v) = &mut self.page else {
            return;
        };
        let Some(d) = v.dialog.as_mut() else {
            return;
        };
        if d.resolving {
            return;
        }
        let Some(storer) = d.selected().map(str::to_string) else {
            return;
        };
        d.resolving = true;
        let file_url = d.file_url.clone();
        self.request(FetchRequest::ContractHash {
            epoch,
            file_url,
            storer,
        });
    }

    /// `w`: wallet of the storer under the cursor (dialog or contract page).
    pub fn open_storer_wallet(&mut self) {
        let address = match &self.page {
            Page::StoredFiles(v) => v
                .dialog
                .as_ref()
                .and_then(|d| d.selected())
                .map(str::to_string),
            Page::Contract {
                detail: Loadable::Ready(d),
                ..
            } => d.contract.as_ref().map(|c| c.storer_address.clone()),
            _ => None,
        };
        if let Some(address) = address {
            self.navigate(Route::WalletDetails {
                address: Some(address),
            });
        }
    }

    // ----- selection -----
    pub fn next_pane(&mut self) {
        if matches!(self.page, Page::Explorer(_)) {
            self.pane = (self.pane + 1) % 2;
            self.log_debug(format!("Tab -> pane={}", self.pane));
        }
    }

    pub fn up(&mut self) {
        self.move_selection(-1);
    }

    pub fn down(&mut self) {
        self.move_selection(1);
    }

    /// Newer block on the strip.
    pub fn left(&mut self) {
        if matches!(self.page, Page::Explorer(_)) && self.pane == 0 {
            self.move_selection(-1);
        }
    }

    /// Older block on the strip.
    pub fn right(&mut self) {
        if matches!(self.page, Page::Explorer(_)) && self.pane == 0 {
            self.move_selection(1);
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let step = |sel: usize, len: usize| clamp(sel.saturating_add_signed(delta), len);
        let pane = self.pane;
        match &mut self.page {
            Page::Explorer(v) if pane == 0 => v.sel_block = step(v.sel_block, v.displayed.len()),
            Page::Explorer(v) => v.sel_tx = step(v.sel_tx, v.recent.len()),
            Page::StoredFiles(v) => match v.dialog.as_mut() {
                Some(d) => d.sel = step(d.sel, d.storers.len()),
                None => v.sel = step(v.sel, v.displayed.len()),
            },
            Page::Wallets(v) => v.sel = step(v.sel, v.displayed.len()),
            Page::Block {
                block: Loadable::Ready(Some(b)),
                sel_tx,
                ..
            } => *sel_tx = step(*sel_tx, b.transactions.len()),
            Page::Contract {
                detail: Loadable::Ready(d),
                sel,
                ..
            } => *sel = step(*sel, d.windows.len()),
            _ => {}
        }
        if delta > 0 {
            self.maybe_load_older();
        }
    }

    /// Request the block below the tail once the strip selection nears the end.
    fn maybe_load_older(&mut self) {
        let filtering = filter::normalize_term(&self.filter_query).is_some();
        let pane = self.pane;
        let Page::Explorer(v) = &mut self.page else {
            return;
        };
        if filtering || pane != 0 || v.loading_older || v.displayed.is_empty() {
            return;
        }
        if v.sel_block + LOAD_OLDER_THRESHOLD < v.displayed.len() - 1 {
            return;
        }
        let Some(height) = v.blocks.next_older_height() else {
            return;
        };
        v.loading_older = true;
        let epoch = self.epoch;
        self.log_debug(format!("requesting older block #{height}"));
        self.request(FetchRequest::OlderBlock { epoch, height });
    }

    /// Enter: open whatever is under the cursor.
    pub fn enter(&mut self) {
        if let Page::StoredFiles(v) = &self.page {
            if v.dialog.is_some() {
                self.choose_storer();
            } else {
                self.open_storers();
            }
            return;
        }
        let target = match &self.page {
            Page::Explorer(v) if self.pane == 0 => v.selected_block().map(|b| Route::Block {
                height: Some(b.height),
            }),
            Page::Explorer(v) => v.recent.get(v.sel_tx).map(|t| Route::Transaction {
                id: Some(t.transaction_id.clone()),
            }),
            Page::Wallets(v) => v.displayed.get(v.sel).map(|w| Route::WalletDetails {
                address: Some(w.address.clone()),
            }),
            Page::Block {
                block: Loadable::Ready(Some(b)),
                sel_tx,
                ..
            } => b.transactions.get(*sel_tx).map(|t| Route::Transaction {
                id: Some(t.transaction_id.clone()),
            }),
            Page::Transaction {
                found: Some((_, b)),
                ..
            } => Some(Route::Block {
                height: Some(b.height),
            }),
            _ => None,
        };
        if let Some(route) = target {
            self.navigate(route);
        }
    }
}
