use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Cell, Clear, List, ListItem, ListState, Paragraph,
        Row, Table, TableState, Wrap,
    },
    Frame,
};
use std::time::Instant;

use crate::app::{App, ExplorerView, InputMode, Loadable, Page, StorersDialog, StoredFilesView, WalletsView};
use crate::filter::SortDirection;
use crate::poller::PollState;
use crate::resolvers::{ContractDetail, WalletDetail};
use crate::router::Route;
use crate::theme::ColorScheme;
use crate::types::{Block as ChainBlock, ProvingState, Transaction};
use crate::util_text::{format_epoch_ms, format_file_length, short_hash, truncate};

const MIN_WIDTH: u16 = 60;
const MIN_HEIGHT: u16 = 15;
/// Width of one tile on the block strip
const TILE_WIDTH: u16 = 18;

// ===============================
// Top-level draw
// ===============================
pub fn draw(f: &mut Frame, app: &App, now: Instant) {
    let c = app.theme().colors();
    let filter_expanded = app.input_mode() == InputMode::Filter || !app.filter_query().is_empty();
    let show_debug = app.debug_visible() && !app.debug_log().is_empty();

    let mut constraints: Vec<Constraint> = Vec::with_capacity(5);
    constraints.push(Constraint::Length(2)); // header
    if filter_expanded {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(0)); // body
    if show_debug {
        constraints.push(Constraint::Length(6));
    }
    constraints.push(Constraint::Length(2)); // footer

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    let mut idx = 0usize;
    header(f, chunks[idx], app, &c);
    idx += 1;
    if filter_expanded {
        filter_bar(f, chunks[idx], app, &c);
        idx += 1;
    }
    body(f, chunks[idx], app, &c, now);
    idx += 1;
    if show_debug {
        debug_panel(f, chunks[idx], app, &c);
        idx += 1;
    }
    footer(f, chunks[idx], app, &c);

    // Overlays render last
    if let Some(d) = app.stored_files().and_then(StoredFilesView::dialog) {
        draw_storers_overlay(f, d, &c);
    }
    if let Some(msg) = app.toast_message() {
        draw_toast_modal(f, msg, &c);
    }
}

fn bordered(title: String, focused: bool, c: &ColorScheme) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(if focused {
            BorderType::Double
        } else {
            BorderType::Rounded
        })
        .border_style(Style::default().fg(if focused {
            c.focus_border
        } else {
            c.unfocused_border
        }))
}

fn highlight(c: &ColorScheme) -> Style {
    Style::default()
        .bg(c.selection_bg)
        .fg(c.selection_fg)
        .add_modifier(Modifier::BOLD)
}

// ===============================
// Header / Filter
// ===============================
fn header(f: &mut Frame, area: Rect, app: &App, c: &ColorScheme) {
    let titles = [
        ("1", "Explorer", Route::Explorer),
        ("2", "Stored Files", Route::StoredFiles),
        ("3", "Wallets", Route::Wallets),
    ];

    let mut spans = Vec::new();
    for (i, (key, title, route)) in titles.iter().enumerate() {
        spans.push(Span::raw(if i == 0 { "┌─" } else { "┬─" }));
        let label = format!("{key}:{title}");
        if app.route() == route {
            spans.push(Span::styled(
                label,
                Style::default()
                    .fg(c.focus_border)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::raw(label));
        }
        spans.push(Span::raw("─"));
    }
    spans.push(Span::raw("┐ "));

    if !app.route().is_top_level() {
        spans.push(Span::styled(
            truncate(&app.route().to_path(), 40),
            Style::default().fg(c.text_dim),
        ));
        spans.push(Span::raw("  "));
    }

    let s = app.summary();
    spans.push(Span::styled("Storage ", Style::default().fg(c.text_dim)));
    spans.push(Span::raw(s.archived_storage.clone()));
    spans.push(Span::styled(" │ Contracts ", Style::default().fg(c.text_dim)));
    spans.push(Span::raw(s.total_contracts.clone()));
    spans.push(Span::styled(" │ Coins ", Style::default().fg(c.text_dim)));
    spans.push(Span::raw(s.total_coins.clone()));

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::BOTTOM).border_type(BorderType::Plain));
    f.render_widget(paragraph, area);
}

fn filter_bar(f: &mut Frame, area: Rect, app: &App, c: &ColorScheme) {
    let focused = app.input_mode() == InputMode::Filter;
    let filter_text = app.filter_query();

    let hint = match app.page() {
        Page::Explorer(_) => "(type to filter blocks by hash)",
        Page::StoredFiles(_) => "(type to filter files by title or date)",
        _ => "(type to filter wallets by address)",
    };
    let text = if filter_text.is_empty() { hint } else { filter_text };

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(if focused { c.focus_border } else { c.text }))
        .block(bordered(" Filter ".into(), focused, c));
    f.render_widget(paragraph, area);

    if focused && area.width > 2 {
        let x = area.x + 1 + (filter_text.chars().count().min(area.width.saturating_sub(2) as usize) as u16);
        f.set_cursor_position((x, area.y + 1));
    }
}

// ===============================
// Body
// ===============================
fn body(f: &mut Frame, area: Rect, app: &App, c: &ColorScheme, now: Instant) {
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let warning_text = format!(
            "Terminal too small!\n\nMinimum size: {}×{}\nCurrent size: {}×{}",
            MIN_WIDTH, MIN_HEIGHT, area.width, area.height
        );
        let warning = Paragraph::new(warning_text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(c.toast_error).add_modifier(Modifier::BOLD))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(c.toast_error)),
            );
        f.render_widget(warning, centered(area, 60, 7));
        return;
    }

    match app.page() {
        Page::Explorer(v) => render_explorer(f, area, v, app.pane(), c, now),
        Page::StoredFiles(v) => render_stored_files(f, area, v, c),
        Page::Wallets(v) => render_wallets(f, area, v, c),
        Page::Block {
            height,
            block,
            sel_tx,
        } => render_block_detail(f, area, *height, block, *sel_tx, c),
        Page::Transaction { id, found } => render_tx_detail(f, area, id.as_deref(), found.as_ref(), c),
        Page::Contract {
            contract_hash,
            detail,
            sel,
            ..
        } => render_contract_detail(f, area, contract_hash.as_deref(), detail, *sel, c),
        Page::Wallet { address, detail } => render_wallet_detail(f, area, address.as_deref(), detail, c),
    }
}

fn loading(f: &mut Frame, area: Rect, title: &str, c: &ColorScheme) {
    let p = Paragraph::new("Loading…")
        .style(Style::default().fg(c.text_dim))
        .block(bordered(format!(" {title} "), false, c));
    f.render_widget(p, area);
}

fn not_found(f: &mut Frame, area: Rect, title: &str, what: &str, c: &ColorScheme) {
    let p = Paragraph::new(format!("{what} not found"))
        .style(Style::default().fg(c.toast_error))
        .block(bordered(format!(" {title} "), false, c));
    f.render_widget(p, area);
}

// ----- explorer -----
fn render_explorer(f: &mut Frame, area: Rect, v: &ExplorerView, pane: usize, c: &ColorScheme, now: Instant) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)])
        .split(area);

    render_block_strip(f, rows[0], v, pane == 0, c, now);
    render_recent_txs(f, rows[1], v, pane == 1, c, now);
}

fn render_block_strip(f: &mut Frame, area: Rect, v: &ExplorerView, focused: bool, c: &ColorScheme, now: Instant) {
    let poll = match v.poll_state() {
        PollState::Fetching => Span::styled(" ⟳ ", Style::default().fg(c.fetching)),
        PollState::Idle => Span::raw(" · "),
    };
    let total = v.blocks().len();
    let shown = v.displayed().len();
    let mut title = if shown < total {
        format!(" Blocks ({shown} / {total}) ")
    } else {
        format!(" Blocks ({total}) ")
    };
    if v.loading_older() {
        title.push_str("loading older… ");
    }
    let frame = bordered(title, focused, c).title(Line::from(poll).alignment(Alignment::Right));
    let inner = frame.inner(area);
    f.render_widget(frame, area);

    if !v.loaded() {
        f.render_widget(Paragraph::new("Loading…").style(Style::default().fg(c.text_dim)), inner);
        return;
    }
    if v.displayed().is_empty() {
        f.render_widget(Paragraph::new("No blocks").style(Style::default().fg(c.text_dim)), inner);
        return;
    }

    // Keep the selected tile on screen
    let fit = (inner.width / TILE_WIDTH).max(1) as usize;
    let start = v.sel_block().saturating_sub(fit - 1);
    let tiles: Vec<&ChainBlock> = v.displayed().iter().skip(start).take(fit).collect();

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Length(TILE_WIDTH); tiles.len()])
        .split(inner);

    for (i, b) in tiles.iter().enumerate() {
        let selected = start + i == v.sel_block();
        let fresh = v.is_new_block(b.height, now);
        let style = if selected && focused {
            highlight(c)
        } else if fresh {
            Style::default().fg(c.fresh).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(c.text)
        };
        let lines = vec![
            Line::from(Span::styled(format!("#{}", b.height), style)),
            Line::from(Span::styled(short_hash(&b.hash), Style::default().fg(c.text_dim))),
            Line::from(format!("{} txs", b.transactions.len())),
        ];
        let tile = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(if fresh { c.fresh } else { c.unfocused_border })),
        );
        f.render_widget(tile, cols[i]);
    }
}

fn render_recent_txs(f: &mut Frame, area: Rect, v: &ExplorerView, focused: bool, c: &ColorScheme, now: Instant) {
    let items: Vec<ListItem> = v
        .recent()
        .iter()
        .map(|t| {
            let text = format!("{:<24} {}", truncate(&t.tx_type, 24), t.transaction_id);
            if v.is_new_tx(&t.transaction_id, now) {
                ListItem::new(text).style(Style::default().fg(c.fresh).add_modifier(Modifier::BOLD))
            } else {
                ListItem::new(text)
            }
        })
        .collect();

    let mut st = ListState::default();
    if !items.is_empty() && focused {
        st.select(Some(v.sel_tx()));
    }
    let list = List::new(items)
        .highlight_style(highlight(c))
        .block(bordered(" Latest Transactions ".into(), focused, c));
    f.render_stateful_widget(list, area, &mut st);
}

// ----- stored files -----
fn render_stored_files(f: &mut Frame, area: Rect, v: &StoredFilesView, c: &ColorScheme) {
    if !v.loaded() {
        loading(f, area, "Stored Files", c);
        return;
    }
    let arrow = match v.sort_direction() {
        Some(SortDirection::Ascending) => " ▲",
        Some(SortDirection::Descending) => " ▼",
        None => "",
    };
    let header = Row::new(vec![
        Cell::from(format!("Date{arrow}")),
        Cell::from("Title"),
        Cell::from("Storers"),
    ])
    .style(Style::default().fg(c.text_dim).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = v
        .displayed()
        .iter()
        .map(|file| {
            Row::new(vec![
                Cell::from(file.date_time.clone()),
                Cell::from(file.title().to_string()),
                Cell::from(file.storer_count().to_string()),
            ])
        })
        .collect();

    let mut st = TableState::default();
    if !rows.is_empty() {
        st.select(Some(v.sel()));
    }
    let title = format!(" Stored Files ({} / {}) ", v.displayed().len(), v.files().len());
    let table = Table::new(
        rows,
        [
            Constraint::Length(21),
            Constraint::Min(20),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .row_highlight_style(highlight(c))
    .block(bordered(title, v.dialog().is_none(), c));
    f.render_stateful_widget(table, area, &mut st);
}

fn draw_storers_overlay(f: &mut Frame, d: &StorersDialog, c: &ColorScheme) {
    let area = f.area();
    let overlay = centered(area, (area.width * 7) / 10, (area.height * 6) / 10);
    f.render_widget(Clear, overlay);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(overlay);

    let items: Vec<ListItem> = if d.storers.is_empty() {
        vec![ListItem::new("No storers").style(Style::default().fg(c.text_dim))]
    } else {
        d.storers.iter().map(|s| ListItem::new(s.as_str())).collect()
    };
    let mut st = ListState::default();
    if !d.storers.is_empty() {
        st.select(Some(d.sel));
    }
    let mut title = format!(" Storers of {} ", truncate(&d.title, 40));
    if d.resolving {
        title.push_str("(resolving…) ");
    }
    let list = List::new(items)
        .highlight_style(highlight(c))
        .block(bordered(title, true, c).style(Style::default().bg(c.background)));
    f.render_stateful_widget(list, chunks[0], &mut st);

    let help = Paragraph::new(Line::from(vec![
        Span::styled("Enter", Style::default().fg(c.focus_border)),
        Span::raw(" contract  "),
        Span::styled("w", Style::default().fg(c.focus_border)),
        Span::raw(" wallet  "),
        Span::styled("Esc", Style::default().fg(c.focus_border)),
        Span::raw(" close"),
    ]))
    .style(Style::default().bg(c.background));
    f.render_widget(help, chunks[1]);
}

// ----- wallets -----
fn render_wallets(f: &mut Frame, area: Rect, v: &WalletsView, c: &ColorScheme) {
    if !v.loaded() {
        loading(f, area, "Wallets", c);
        return;
    }
    let header = Row::new(vec!["Address", "Balance", "Mined"])
        .style(Style::default().fg(c.text_dim).add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = v
        .displayed()
        .iter()
        .map(|w| {
            Row::new(vec![
                Cell::from(w.address.clone()),
                Cell::from(w.balance.clone()),
                Cell::from(v.mined(&w.address).unwrap_or("0").to_string()),
            ])
        })
        .collect();

    let mut st = TableState::default();
    if !rows.is_empty() {
        st.select(Some(v.sel()));
    }
    let table = Table::new(
        rows,
        [
            Constraint::Min(30),
            Constraint::Length(20),
            Constraint::Length(20),
        ],
    )
    .header(header)
    .row_highlight_style(highlight(c))
    .block(bordered(format!(" Wallets ({}) ", v.displayed().len()), true, c));
    f.render_stateful_widget(table, area, &mut st);
}

// ----- detail pages -----
fn field<'a>(label: &'a str, value: String, c: &ColorScheme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label:<18}"), Style::default().fg(c.text_dim)),
        Span::raw(value),
    ])
}

fn render_block_detail(
    f: &mut Frame,
    area: Rect,
    height: Option<u64>,
    block: &Loadable<Option<ChainBlock>>,
    sel_tx: usize,
    c: &ColorScheme,
) {
    let title = match height {
        Some(h) => format!("Block #{h}"),
        None => "Block".to_string(),
    };
    let b = match block {
        Loadable::Loading => return loading(f, area, &title, c),
        Loadable::Ready(None) => return not_found(f, area, &title, "Block", c),
        Loadable::Ready(Some(b)) => b,
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(area);

    let mut lines = vec![
        field("Height", b.height.to_string(), c),
        field("Hash", b.hash.clone(), c),
    ];
    if let Some(prev) = &b.previous_hash {
        lines.push(field("Previous hash", prev.clone(), c));
    }
    if let Some(ts) = b.timestamp {
        lines.push(field("Timestamp", format_epoch_ms(ts), c));
    }
    f.render_widget(
        Paragraph::new(lines).block(bordered(format!(" {title} "), false, c)),
        rows[0],
    );

    let items: Vec<ListItem> = b
        .transactions
        .iter()
        .map(|t| ListItem::new(format!("{:<24} {}", truncate(&t.tx_type, 24), t.transaction_id)))
        .collect();
    let mut st = ListState::default();
    if !items.is_empty() {
        st.select(Some(sel_tx));
    }
    let list = List::new(items)
        .highlight_style(highlight(c))
        .block(bordered(format!(" Transactions ({}) ", b.transactions.len()), true, c));
    f.render_stateful_widget(list, rows[1], &mut st);
}

fn render_tx_detail(f: &mut Frame, area: Rect, id: Option<&str>, found: Option<&(Transaction, ChainBlock)>, c: &ColorScheme) {
    let Some((tx, block)) = found else {
        return not_found(f, area, "Transaction", "Transaction", c);
    };
    let mut lines = vec![
        field("Transaction", id.unwrap_or(tx.transaction_id.as_str()).to_string(), c),
        field("Type", tx.tx_type.clone(), c),
        field("Block", format!("#{} {}", block.height, short_hash(&block.hash)), c),
        Line::from(""),
    ];
    let extra = serde_json::to_string_pretty(&tx.extra).unwrap_or_default();
    lines.extend(extra.lines().map(|l| Line::from(l.to_string())));

    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(bordered(" Transaction ".into(), true, c));
    f.render_widget(p, area);
}

fn render_contract_detail(
    f: &mut Frame,
    area: Rect,
    contract_hash: Option<&str>,
    detail: &Loadable<ContractDetail>,
    sel: usize,
    c: &ColorScheme,
) {
    let title = format!(" Storage Contract {} ", short_hash(contract_hash.unwrap_or("")));
    let d = match detail {
        Loadable::Loading => return loading(f, area, &title, c),
        Loadable::Ready(d) => d,
    };
    let Some(k) = &d.contract else {
        return not_found(f, area, &title, "Storage contract", c);
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(11), Constraint::Min(0)])
        .split(area);

    let lines = vec![
        field("File", k.file_url.clone(), c),
        field("Storer", k.storer_address.clone(), c),
        field("Merkle root", k.merkle_root.clone(), c),
        field("Created", format_epoch_ms(k.timestamp), c),
        field("Value", k.value.clone(), c),
        field("Proof frequency", format!("{} blocks", k.proof_frequency), c),
        field("Window size", format!("{} blocks", k.window_size), c),
        field("File length", format_file_length(k.file_length), c),
        field("Storage type", k.storage_type.clone(), c),
    ];
    f.render_widget(Paragraph::new(lines).block(bordered(title, false, c)), rows[0]);

    let header = Row::new(vec!["Start", "End", "State", "Challenge"])
        .style(Style::default().fg(c.text_dim).add_modifier(Modifier::BOLD));
    let table_rows: Vec<Row> = d
        .windows
        .iter()
        .map(|w| {
            let state_color = match w.state {
                ProvingState::Proved => c.proved,
                ProvingState::Failed => c.failed,
                ProvingState::Proving => c.fetching,
                ProvingState::Pending => c.text_dim,
            };
            Row::new(vec![
                Cell::from(w.start_block_index.to_string()),
                Cell::from(w.end_block_index.to_string()),
                Cell::from(w.state.to_string()).style(Style::default().fg(state_color)),
                Cell::from(short_hash(&w.po_dp_challenge)),
            ])
        })
        .collect();
    let mut st = TableState::default();
    if !table_rows.is_empty() {
        st.select(Some(sel));
    }
    let table = Table::new(
        table_rows,
        [
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Min(14),
        ],
    )
    .header(header)
    .row_highlight_style(highlight(c))
    .block(bordered(format!(" Proving Windows ({}) ", d.windows.len()), true, c));
    f.render_stateful_widget(table, rows[1], &mut st);
}

fn render_wallet_detail(f: &mut Frame, area: Rect, address: Option<&str>, detail: &Loadable<WalletDetail>, c: &ColorScheme) {
    let d = match detail {
        Loadable::Loading => return loading(f, area, "Wallet", c),
        Loadable::Ready(d) => d,
    };
    let Some(balance) = &d.balance else {
        return not_found(f, area, "Wallet", "Wallet", c);
    };
    let lines = vec![
        field("Address", address.unwrap_or(d.address.as_str()).to_string(), c),
        field("Balance", balance.balance.clone(), c),
        field("Mined", d.mined.clone().unwrap_or_else(|| "0".into()), c),
    ];
    f.render_widget(Paragraph::new(lines).block(bordered(" Wallet ".into(), true, c)), area);
}

// ===============================
// Footer / Debug / Overlays
// ===============================
fn footer(f: &mut Frame, area: Rect, app: &App, c: &ColorScheme) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(c.focus_border));
    let mut spans: Vec<Span> = vec![key("1-3"), Span::raw(" pages │ ")];

    match app.page() {
        Page::Explorer(_) => {
            spans.extend([key("Tab"), Span::raw(" switch │ "), key("←/→"), Span::raw(" blocks │ ")]);
            spans.extend([key("/"), Span::raw(" filter │ ")]);
        }
        Page::StoredFiles(_) => {
            spans.extend([key("s"), Span::raw(" sort │ "), key("i"), Span::raw(" storers │ ")]);
            spans.extend([key("/"), Span::raw(" filter │ ")]);
        }
        Page::Wallets(_) => spans.extend([key("/"), Span::raw(" filter │ ")]),
        Page::Contract { .. } => spans.extend([key("w"), Span::raw(" storer wallet │ ")]),
        _ => {}
    }
    if app.can_go_back() {
        spans.extend([key("Bksp"), Span::raw(" back │ ")]);
    }
    spans.extend([
        key("r"),
        Span::raw(" reload │ "),
        key("Ctrl+D"),
        Span::raw(" debug │ "),
        key("q"),
        Span::raw(" quit"),
    ]);
    if app.debug_visible() {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled("[DEBUG]", Style::default().fg(c.debug_indicator)));
    }
    spans.push(Span::raw(format!(" │ FPS {}", app.fps())));

    let w = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::TOP).border_type(BorderType::Plain));
    f.render_widget(w, area);
}

fn debug_panel(f: &mut Frame, area: Rect, app: &App, c: &ColorScheme) {
    let log = app.debug_log();
    let lines_to_show = area.height.saturating_sub(2) as usize;
    let start = log.len().saturating_sub(lines_to_show);
    let lines: Vec<Line> = log[start..]
        .iter()
        .map(|msg| Line::from(Span::raw(msg.as_str())))
        .collect();

    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(c.text_dim))
        .block(
            Block::default()
                .title(" Debug ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(c.text_dim)),
        );
    f.render_widget(paragraph, area);
}

fn draw_toast_modal(f: &mut Frame, message: &str, c: &ColorScheme) {
    let area = f.area();
    let overlay = centered(area, (area.width * 4) / 10, 3);
    f.render_widget(Clear, overlay);

    let text = Paragraph::new(message.to_string())
        .style(Style::default().fg(c.toast_error).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(c.toast_error)),
        );
    f.render_widget(text, overlay);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use crate::types::AppEvent;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn explorer_renders_blocks_and_summary() {
        let mut app = App::new(30, Theme::default(), Duration::from_millis(600), None);
        app.start(Route::Explorer);
        let epoch = app.epoch();
        app.on_event(AppEvent::ExplorerLoaded {
            epoch,
            blocks: vec![ChainBlock {
                height: 42,
                hash: "abcdef0123456789".into(),
                transactions: vec![Transaction::new("tx-1", "TRANSFER")],
                previous_hash: None,
                timestamp: None,
            }],
        });

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| draw(f, &app, Instant::now())).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("#42"));
        assert!(text.contains("tx-1"));
        assert!(text.contains("Contracts"));
    }

    #[test]
    fn small_terminal_shows_warning() {
        let app = App::new(30, Theme::default(), Duration::from_millis(600), None);
        let mut terminal = Terminal::new(TestBackend::new(50, 12)).unwrap();
        terminal.draw(|f| draw(f, &app, Instant::now())).unwrap();
        assert!(buffer_text(&terminal).contains("Terminal too small"));
    }

    #[test]
    fn missing_contract_renders_not_found() {
        let mut app = App::new(30, Theme::default(), Duration::from_millis(600), None);
        app.start(Route::ContractDetails {
            contract_hash: None,
            file_url: None,
        });
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, &app, Instant::now())).unwrap();
        assert!(buffer_text(&terminal).contains("Storage contract not found"));
    }
}
