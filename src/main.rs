use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::Context;
use c4_game::{config::GameConfig, game::GameSession, tui};
use clap::Parser;

const DEFAULT_CONFIG_PATH: &str = "c4_game.toml";

/// Two-player Connect Four in the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// TOML config file. Defaults to ./c4_game.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of columns (overrides the config file).
    #[arg(long)]
    width: Option<usize>,

    /// Number of rows (overrides the config file).
    #[arg(long)]
    height: Option<usize>,

    /// Write logs to this file (overrides the config file).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    /// Resolves the final config: CLI flags, then the config file, then defaults.
    fn resolve_config(&self) -> anyhow::Result<GameConfig> {
        let config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::load_or_default(Path::new(DEFAULT_CONFIG_PATH))?,
        };
        Ok(config.with_overrides(self.width, self.height, self.log_file.clone())?)
    }
}

/// Installs the logger. Without a log file nothing is written unless RUST_LOG is set, as stderr
/// output would corrupt the TUI.
fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    let default_filter = if log_file.is_some() { "info" } else { "off" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.try_init()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = args.resolve_config()?;
    init_logging(config.log_file.as_deref())?;

    let session = GameSession::from_config(&config)?;
    log::info!("starting a {}x{} game", config.width, config.height);

    let mut terminal = tui::init()?;
    let mut app = tui::App::new(session);
    let res = app.run(&mut terminal);

    // Restore terminal even when the app loop failed
    tui::restore()?;
    res?;
    Ok(())
}
