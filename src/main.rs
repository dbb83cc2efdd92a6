use std::fs::File;
use std::panic;
use std::path::{Path, PathBuf};

use apple_snake::error::AppError;
use apple_snake::game::GameLoop;
use apple_snake::runtime;
use apple_snake::terminal_runtime::{
    TerminalInput, TerminalPresenter, TerminalSession, restore_terminal,
};
use clap::{Parser, ValueEnum};
use log::{LevelFilter, info};
use simplelog::{Config, WriteLogger};

#[derive(Debug, Parser)]
#[command(version, about = "Steer the snake to the apples; don't bite yourself.")]
struct Cli {
    /// Seed for apple placement, for a reproducible session.
    #[arg(long)]
    seed: Option<u64>,

    /// Do not ring the terminal bell on apples and crashes.
    #[arg(long)]
    mute: bool,

    /// Write a log to this file.
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log verbosity, used together with `--log-file`.
    #[arg(long = "log-level", value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path, cli.log_level.into())?;
    }

    install_panic_hook();

    let mut game = match cli.seed {
        Some(seed) => GameLoop::new_with_seed(seed),
        None => GameLoop::new(),
    };
    info!("starting session, seed {:?}", cli.seed);

    let session = TerminalSession::enter()?;
    let mut presenter = TerminalPresenter::new(session, cli.mute);
    let mut input = TerminalInput::new();

    let summary = runtime::run(&mut game, &mut input, &mut presenter)?;
    drop(presenter);

    println!(
        "Thanks for playing: {} ticks, {} game(s) over.",
        summary.ticks, summary.games_over
    );
    Ok(())
}

fn init_logging(path: &Path, level: LevelFilter) -> Result<(), AppError> {
    let file = File::create(path).map_err(|source| AppError::LogFile {
        path: path.to_path_buf(),
        source,
    })?;
    WriteLogger::init(level, Config::default(), file)?;

    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));
}
