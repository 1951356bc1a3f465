//! Kiosk binary: load configuration, start logging, run full screen.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use kiosk_tui::catalog::Catalog;
use kiosk_tui::config::KioskConfig;
use kiosk_tui::logging;
use kiosk_tui::pipeline::{self, TerminalFeedback};
use kiosk_tui::screens::Kiosk;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "kiosk-tui")]
#[command(about = "Self-service ordering kiosk for the terminal")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log file (overrides the config)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Seconds the confirmation screen stays up (overrides the config)
    #[arg(long, value_name = "SECS")]
    countdown: Option<u32>,

    /// Do not ring the terminal bell
    #[arg(long)]
    no_sound: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => KioskConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => KioskConfig::default(),
    };
    if let Some(secs) = cli.countdown {
        config.countdown_secs = secs.max(1);
    }
    if cli.no_sound {
        config.sound = false;
    }
    if let Some(file) = cli.log_file {
        config.log.file = Some(file);
    }

    if let Some(file) = &config.log.file {
        logging::init(&config.log.level, file)
            .with_context(|| format!("opening log file {}", file.display()))?;
    }

    let settings = config.settings().context("building kiosk settings")?;
    let kiosk = Kiosk::with_system_clock(Catalog::builtin(), settings);

    info!(store = %config.store_name, countdown = config.countdown_secs, "kiosk starting");
    pipeline::run(kiosk, TerminalFeedback::stdout(config.sound)).context("kiosk terminal session")?;
    info!("kiosk stopped");
    Ok(())
}
