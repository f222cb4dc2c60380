mod app;
mod config;
mod controller;
mod domain;
mod gate;
mod input;
mod report;
mod scheduler;
mod store;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use config::{config_path, Config};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::subscriber::NoSubscriber;
use tracing::info;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

#[derive(Parser)]
#[command(name = "pausa", version)]
#[command(about = "A mindful terminal to-do list: pause first, then get things done", long_about = None)]
struct Cli {
    /// Config file (defaults to <config dir>/pausa/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Go straight to the task list
    #[arg(long)]
    skip_pause: bool,

    /// Write logs to this file while the TUI is running
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a config file with the default values
    InitConfig,
    /// Print the weekly focus metrics
    Metrics {
        /// Also write the report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let path = config_path(cli.config)?;

    match cli.command {
        Some(Commands::InitConfig) => {
            install_tracing();
            Config::default().write_new(&path)?;
            info!(path = %path.display(), "config written");
            println!("Wrote default config to {}", path.display());
            Ok(())
        }
        Some(Commands::Metrics { output }) => {
            install_tracing();
            let report = report::write_report(output.as_deref())?;
            print!("{}", report);
            Ok(())
        }
        None => {
            let config = Config::load(&path)?;
            match cli.log_file {
                Some(log_file) => {
                    install_file_tracing(&log_file)?;
                    run_tui(&config, cli.skip_pause)
                }
                // Anything written to stderr would tear through the alternate screen
                None => tracing::subscriber::with_default(NoSubscriber::default(), || {
                    run_tui(&config, cli.skip_pause)
                }),
            }
        }
    }
}

fn install_tracing() {
    // RUST_LOG overrides the default INFO level
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(io::stderr)
        .compact()
        .try_init();
}

fn install_file_tracing(log_path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

fn run_tui(config: &Config, skip_pause: bool) -> Result<()> {
    let mut app = AppState::new(config, skip_pause);
    info!(skip_pause, "starting");

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    // Run app
    let result = run_app(&mut terminal, &mut app, ticker::tick_duration(config.tick_ms));

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    tick_rate: std::time::Duration,
) -> Result<()> {
    let mut dirty = true;

    loop {
        // Fire due timers before drawing so nothing overdue is shown
        if app.tick() {
            dirty = true;
        }

        if dirty {
            terminal.draw(|f| ui::render(f, app))?;
            dirty = false;
        }

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            match event::read()? {
                // Only process key press events (ignore key release)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if input::handle_key(app, key)? {
                        info!("quit");
                        return Ok(());
                    }
                    dirty = true;
                }
                Event::Resize(_, _) => dirty = true,
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["pausa"]).unwrap();
        assert!(!cli.skip_pause);
        assert!(cli.config.is_none());
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_flags_and_subcommands() {
        let cli = Cli::try_parse_from(["pausa", "--skip-pause", "--log-file", "/tmp/pausa.log"]).unwrap();
        assert!(cli.skip_pause);
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/pausa.log")));

        let cli = Cli::try_parse_from(["pausa", "metrics", "--output", "week.md"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Metrics { output: Some(ref p) }) if p == Path::new("week.md")
        ));

        let cli = Cli::try_parse_from(["pausa", "init-config", "--config", "/tmp/c.json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::InitConfig)));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.json")));
    }
}
