// Native binary for storx - terminal UI and one-shot subcommands

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    fs::OpenOptions,
    io,
    path::Path,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tokio::task::JoinHandle;

use storx::{
    app::{App, InputMode},
    commands,
    config::{load, Config},
    fetcher::{self, FetchRequest},
    gateway::{ExplorerApi, HttpGateway},
    router::{self, Route},
    types::AppEvent,
    ui,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (safe to ignore if not found)
    let _ = dotenvy::dotenv();

    let cfg = load().context("Failed to load configuration")?;

    let gateway = HttpGateway::new(&cfg.backend_url, cfg.request_timeout())
        .context("Failed to build HTTP client")?;
    let api: Arc<dyn ExplorerApi> = Arc::new(gateway);

    if let Some(cmd) = cfg.command.clone() {
        init_stderr_logger();
        let mut stdout = io::stdout().lock();
        return commands::run_command(api.as_ref(), cmd, &mut stdout).await;
    }

    init_file_logger(&cfg.log_file)?;
    for line in cfg.summary_lines() {
        log::info!("{line}");
    }

    let route = match cfg.route.as_deref() {
        Some(raw) => router::parse(raw)
            .with_context(|| format!("Unknown route: {raw}"))?,
        None => Route::Explorer,
    };

    run_tui(cfg, api, route).await
}

fn init_stderr_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

/// The terminal owns stdout/stderr while the UI runs, so logs go to a file.
fn init_file_logger(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

async fn run_tui(cfg: Config, api: Arc<dyn ExplorerApi>, route: Route) -> Result<()> {
    // terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // app + channels
    let (tx, rx) = unbounded_channel::<AppEvent>();
    let (req_tx, req_rx) = unbounded_channel::<FetchRequest>();

    let fetch_task: JoinHandle<Result<()>> = {
        let settings = cfg.poll_settings();
        tokio::spawn(fetcher::run_fetcher(api, settings, req_rx, tx))
    };

    let mut app = App::new(cfg.render_fps, cfg.theme, cfg.animation_settle(), Some(req_tx));
    app.start(route);
    log::info!("🚀 storx started against {}", cfg.backend_url);

    // main loop
    let result = run_loop(&mut app, &mut terminal, rx).await;

    // cleanup
    fetch_task.abort();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

async fn run_loop(
    app: &mut App,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut rx: UnboundedReceiver<AppEvent>,
) -> Result<()> {
    let mut last_frame = Instant::now();
    let mut dirty = true;

    loop {
        // frame budget (coalesced renders)
        let frame_ms = 1000u32.saturating_div(app.fps()) as u64;
        let budget = Duration::from_millis(frame_ms.max(1));
        let wait = budget.saturating_sub(last_frame.elapsed());

        if event::poll(wait)? {
            if let Event::Key(k) = event::read()? {
                if k.kind == KeyEventKind::Press || k.kind == KeyEventKind::Repeat {
                    handle_key(app, k);
                }
            }
            dirty = true;
        }
        while let Ok(ev) = rx.try_recv() {
            app.on_event(ev);
            dirty = true;
        }

        let now = Instant::now();
        // Entrance highlights are drawn while live; one more frame clears them
        let animating = app
            .explorer()
            .is_some_and(|v| v.new_blocks().is_some() || v.new_txs().is_some());
        if app.tick(now) || animating || app.toast_message().is_some() {
            dirty = true;
        }

        if dirty && last_frame.elapsed() >= budget {
            terminal.draw(|f| ui::draw(f, app, now))?;
            last_frame = Instant::now();
            dirty = false;
        }
        if app.quit_flag() {
            break;
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, k: KeyEvent) {
    // Handle filter input mode separately
    if app.input_mode() == InputMode::Filter {
        match k.code {
            KeyCode::Char(c) => app.filter_add_char(c),
            KeyCode::Backspace => app.filter_backspace(),
            KeyCode::Enter => app.apply_filter(),
            KeyCode::Esc => app.clear_filter(),
            _ => {}
        }
        return;
    }

    match (k.code, k.modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.on_event(AppEvent::Quit);
        }
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => app.toggle_debug_panel(),

        // Pages
        (KeyCode::Char('1'), _) => app.navigate(Route::Explorer),
        (KeyCode::Char('2'), _) => app.navigate(Route::StoredFiles),
        (KeyCode::Char('3'), _) => app.navigate(Route::Wallets),
        (KeyCode::Backspace, _) => app.back(),
        (KeyCode::Char('r'), _) => app.reload(),

        // Selection
        (KeyCode::Tab, _) | (KeyCode::BackTab, _) => app.next_pane(),
        (KeyCode::Up, _) => app.up(),
        (KeyCode::Down, _) => app.down(),
        (KeyCode::Left, _) => app.left(),
        (KeyCode::Right, _) => app.right(),
        (KeyCode::Enter, _) => app.enter(),

        (KeyCode::Char('/'), _) => app.start_filter(),
        (KeyCode::Esc, _) => app.escape(),
        (KeyCode::Char('s'), _) => app.toggle_sort(),
        (KeyCode::Char('i'), _) => app.open_storers(),
        (KeyCode::Char('w'), _) => app.open_storer_wallet(),
        _ => {}
    }
}
