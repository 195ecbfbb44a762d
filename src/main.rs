use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{LevelFilter, error, info};
use terminal_snake::app::App;
use terminal_snake::config::{FRAME_INTERVAL_MS, GameSetup, TICK_INTERVAL_MS};
use terminal_snake::game::GameEngine;
use terminal_snake::input::InputHandler;
use terminal_snake::logging::{init_file_logger, log_path};
use terminal_snake::renderer;
use terminal_snake::score::{HighScoreStore, scores_path};
use terminal_snake::terminal_runtime::TerminalSession;
use terminal_snake::tick::IntervalTimer;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Leaderboard file (defaults to the platform data directory).
    #[arg(long = "scores-file", value_name = "PATH")]
    scores_file: Option<PathBuf>,

    /// Log file (defaults to the platform data directory).
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Minimum level written to the log file.
    #[arg(long = "log-level", default_value = "info")]
    log_level: LevelFilter,

    /// Seed for food placement, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the leaderboard and exit.
    #[arg(long)]
    leaderboard: bool,

    /// With --leaderboard, print JSON instead of a table.
    #[arg(long, requires = "leaderboard")]
    json: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let log_file = cli.log_file.clone().unwrap_or_else(log_path);
    if let Err(error) = init_file_logger(&log_file, cli.log_level) {
        eprintln!("Logging disabled ({}): {error}", log_file.display());
    }

    // Surface store problems before the terminal switches to raw mode.
    let store_path = cli.scores_file.clone().unwrap_or_else(scores_path);
    let store = HighScoreStore::open(&store_path).map_err(|error| {
        error!("cannot open {}: {error}", store_path.display());
        io::Error::other(format!(
            "cannot read high scores from {}: {error}",
            store_path.display()
        ))
    })?;

    let result = if cli.leaderboard {
        print_leaderboard(&store, cli.json)
    } else {
        run(store, cli.seed)
    };

    if let Err(error) = &result {
        error!("terminated with error: {error}");
    }
    result
}

fn run(store: HighScoreStore, seed: Option<u64>) -> io::Result<()> {
    let timer = IntervalTimer::new(Duration::from_millis(TICK_INTERVAL_MS));
    let engine = match seed {
        Some(seed) => GameEngine::new_with_seed(GameSetup::default(), timer, seed),
        None => GameEngine::new(GameSetup::default(), timer),
    }
    .map_err(io::Error::other)?;

    let mut app = App::new(engine, store);
    let mut input = InputHandler::new(Duration::from_millis(FRAME_INTERVAL_MS));
    let mut session = TerminalSession::enter()?;
    info!("terminal session started");

    while !app.should_quit() {
        session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &app))?;

        if let Some(game_input) = input.poll_input(app.input_mode())? {
            app.handle_input(game_input);
        }

        if app.wants_ticks() && app.engine_mut().ticks_mut().poll_due(Instant::now()) {
            app.tick();
        }
    }

    info!("quit requested");
    Ok(())
}

fn print_leaderboard(store: &HighScoreStore, json: bool) -> io::Result<()> {
    let mut stdout = io::stdout().lock();

    if json {
        serde_json::to_writer_pretty(&mut stdout, store.entries()).map_err(io::Error::other)?;
        writeln!(stdout)?;
        return Ok(());
    }

    if store.is_empty() {
        writeln!(stdout, "No high scores yet.")?;
        return Ok(());
    }

    for (rank, entry) in store.entries().iter().enumerate() {
        writeln!(
            stdout,
            "{:>3}. {:<16} {:>5}  {}",
            rank + 1,
            entry.name,
            entry.score,
            entry.date
        )?;
    }
    Ok(())
}
