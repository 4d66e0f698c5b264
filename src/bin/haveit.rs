// Native binary for haveit - Terminal UI mode

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

use haveit::{
    api::{ApiClient, OnlineFlag},
    app::{App, Pane},
    config::load,
    driver::{AppEvent, Driver},
    platform, ui,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (safe to ignore if not found)
    let _ = dotenvy::dotenv();

    let cfg = load().context("Failed to load configuration")?;
    platform::init_logging(cfg.log_file.as_deref()).context("Failed to initialize logging")?;
    cfg.log_summary();

    let online = OnlineFlag::new(!cfg.offline);
    let client = ApiClient::new(&cfg.api_url, cfg.request_timeout_ms, online)
        .context("Failed to build HTTP client")?;

    // app + channels
    let (tx, rx) = unbounded_channel::<AppEvent>();
    let driver = Driver::new(Arc::new(client), Duration::from_millis(cfg.debounce_ms), tx);
    let mut app = App::new(&cfg, driver);
    app.start();

    // terminal
    let result = match setup_terminal() {
        Ok(mut terminal) => {
            let result = run_loop(&mut app, &mut terminal, rx).await;
            let _ = terminal.show_cursor();
            result
        }
        Err(e) => Err(e),
    };

    // cleanup (always restore the terminal, even on error)
    restore_terminal()?;
    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

async fn run_loop(
    app: &mut App,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut rx: UnboundedReceiver<AppEvent>,
) -> Result<()> {
    let mut last_frame = Instant::now();

    loop {
        // frame budget (coalesced renders)
        let frame_ms = 1000u32.saturating_div(app.fps()) as u64;
        let budget = Duration::from_millis(frame_ms.max(1));
        let wait = budget.saturating_sub(last_frame.elapsed());

        // input or async completions
        if event::poll(wait)? {
            if let Event::Key(k) = event::read()? {
                if k.kind == KeyEventKind::Press || k.kind == KeyEventKind::Repeat {
                    handle_key(app, k);
                }
            }
        }
        while let Ok(ev) = rx.try_recv() {
            app.on_event(ev);
        }

        app.tick();
        if last_frame.elapsed() >= budget {
            terminal.draw(|f| ui::draw(f, app))?;
            last_frame = Instant::now();
        }
        if app.quit_flag() {
            break;
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, k: KeyEvent) {
    match (k.code, k.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => {
            app.quit();
            return;
        }
        (KeyCode::Tab, _) | (KeyCode::BackTab, _) => {
            app.toggle_pane();
            return;
        }
        (KeyCode::Char('y'), KeyModifiers::CONTROL) => {
            if let Some(link) = app.copy_selected() {
                log::info!("copied {link}");
            }
            return;
        }
        (KeyCode::Up, _) => {
            app.move_selection(-1);
            return;
        }
        (KeyCode::Down, _) => {
            app.move_selection(1);
            return;
        }
        _ => {}
    }

    match app.pane() {
        Pane::Search => match k.code {
            KeyCode::Enter => app.submit_search(),
            KeyCode::Backspace => app.backspace(),
            KeyCode::Char(c) if !k.modifiers.contains(KeyModifiers::CONTROL) => app.push_char(c),
            _ => {}
        },
        Pane::Listing => match k.code {
            KeyCode::Right | KeyCode::Char('n') => app.next_page(),
            KeyCode::Left | KeyCode::Char('p') => app.prev_page(),
            KeyCode::Char('r') => app.reload_listing(),
            KeyCode::Char('c') => {
                if let Some(link) = app.copy_selected() {
                    log::info!("copied {link}");
                }
            }
            KeyCode::Char('/') => app.focus(Pane::Search),
            _ => {}
        },
    }
}
