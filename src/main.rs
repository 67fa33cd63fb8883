mod app;
mod config;
mod error;
mod input;
mod launcher;
mod logging;
mod picker;
mod screens;
mod signals;
mod store;
mod types;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use signals::QuitSignals;
use store::GameStore;
use tracing::{info, warn};
use ui::hitmap::HitMap;

const TICK_RATE: Duration = Duration::from_millis(33); // ~30 fps

#[derive(Parser, Debug)]
#[command(name = "mkast")]
#[command(about = "Retro arcade game launcher", long_about = None)]
#[command(version)]
struct Cli {
    /// Games file to load
    games_file: Option<PathBuf>,

    /// Games file to load (takes precedence over the positional argument)
    #[arg(short = 'g', long = "games")]
    games: Option<PathBuf>,

    /// Rewrite the config with the current display resolution
    #[arg(long)]
    update_resolution: bool,

    /// Config file
    #[arg(short = 'c', long = "config", default_value = config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

impl Cli {
    fn games_path(&self) -> PathBuf {
        self.games
            .clone()
            .or_else(|| self.games_file.clone())
            .unwrap_or_else(|| PathBuf::from(store::DEFAULT_GAMES_FILE))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = logging::init();

    info!("mkast {} starting", env!("CARGO_PKG_VERSION"));

    let games_path = cli.games_path();
    info!(path = %games_path.display(), "using games file");

    let mut config = config::load_or_create(&cli.config);
    if let Err(e) = config::refresh_resolution(
        &cli.config,
        &mut config,
        config::probe_resolution(),
        cli.update_resolution,
    ) {
        warn!("could not store display resolution: {}", e);
    }

    let (store, games) = GameStore::open(games_path);
    info!(count = games.len(), "games loaded");
    let fullscreen = config.fullscreen;
    let mut app = App::new(config, store, games);

    // Registered before raw mode so a close request can never skip the restore.
    let mut quit_signals = QuitSignals::install();

    // Terminal setup
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    if fullscreen {
        execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    }
    execute!(stdout, EnableMouseCapture).context("enabling mouse capture")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("creating terminal")?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app, &mut quit_signals).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture)?;
    if fullscreen {
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    }
    terminal.show_cursor()?;

    match &result {
        Ok(()) => info!("launcher closed"),
        Err(e) => tracing::error!("launcher stopped: {:#}", e),
    }
    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    quit_signals: &mut QuitSignals,
) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        app.poll_picker();
        if quit_signals.poll() {
            app.quit_signal();
        }

        // Render, then swap in the regions this frame registered.
        let mut hits = HitMap::default();
        terminal.draw(|f| ui::draw(f, app, &mut hits))?;
        app.hit_map = hits;

        let timeout = TICK_RATE
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                // Only handle key press events, ignore release/repeat
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
        }

        if app.minimize_requested {
            app.minimize_requested = false;
            let backend = terminal.backend_mut();
            backend.write_all(launcher::ICONIFY_SEQUENCE.as_bytes())?;
            backend.flush()?;
        }

        // Tick update
        if last_tick.elapsed() >= TICK_RATE {
            app.tick = app.tick.wrapping_add(1);
            last_tick = Instant::now();
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
