//! BLOCKFALL - a falling-block puzzle game for the terminal

mod board;
mod collision;
mod game;
mod input;
mod piece;
mod random;
mod settings;
mod tetromino;
mod ui;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use game::{Action, Game, TickOutcome};
use input::InputHandler;
use ratatui::{backend::CrosstermBackend, Terminal};
use settings::Settings;
use std::{
    io::{self, stdout},
    time::{Duration, Instant},
};

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Get the blockfall temp directory, creating it if needed
fn blockfall_temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("blockfall");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    let session_id: u32 = rand::random();

    // Log to a file so the terminal stays clean
    let log_dir = blockfall_temp_dir();
    let log_file = format!("{:08x}.log", session_id);
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("blockfall=debug")),
        )
        .with_ansi(false)
        .init();

    tracing::info!(
        "BLOCKFALL starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let settings = Settings::load();
    let config = settings.gameplay.game_config();
    let mut game = match settings.gameplay.seed {
        Some(seed) => {
            tracing::info!(seed, "using fixed seed");
            Game::with_seed(config, seed)
        }
        None => Game::new(config),
    };
    let input = InputHandler::from_settings(&settings);

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut game, &input);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    match &result {
        Ok(()) => {
            tracing::info!(
                score = game.score(),
                pieces = game.pieces_locked(),
                "session finished"
            );
            println!("Score: {}", game.score());
        }
        Err(e) => tracing::error!("terminal error: {}", e),
    }

    result
}

/// Poll input, apply it, tick gravity when due, draw. Returns on quit.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut Game,
    input: &InputHandler,
) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| ui::render_game(frame, game))?;

        if event::poll(FRAME_DURATION)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match input.key_down(key) {
                        Some(Action::Quit) => return Ok(()),
                        Some(action) => game.process_action(action),
                        None => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= game.fall_interval() {
            last_tick = Instant::now();
            if let TickOutcome::Locked { rows_cleared } = game.tick() {
                if rows_cleared > 0 {
                    tracing::debug!(
                        rows_cleared,
                        score = game.score(),
                        speed = game.speed(),
                        "rows cleared"
                    );
                }
                if game.overlaps_locked() {
                    tracing::info!(score = game.score(), "board topped out, restarting");
                    game.reset();
                }
            }
        }
    }
}
