//! Prop slip generator.
//!
//! Scrapes a +EV odds dashboard, picks the strongest propositions, builds a
//! one-click wager-builder link and pushes it to a Telegram chat.

mod config;
mod cycle;
mod schedule;

use std::fs::OpenOptions;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use common::config::LoggingConfig;
use oddsjam_client::OddsJamClient;
use prop_extractor::PropExtractor;
use telegram_client::{NotifyOutcome, SlipNotifier, TelegramClient};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::cycle::SlipGenerator;

#[derive(Debug, Parser)]
#[command(name = "slip-generator", about = "Generate +EV prop slips and send them to Telegram")]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Run a single cycle and exit, regardless of schedule settings.
    #[arg(long)]
    once: bool,

    /// Build slips and log the message instead of sending it.
    #[arg(long)]
    dry_run: bool,

    /// Send a Telegram test message and exit.
    #[arg(long)]
    check_notify: bool,
}

const CRATES: [&str; 5] = [
    "slip_generator",
    "prop_extractor",
    "slip_strategy",
    "telegram_client",
    "oddsjam_client",
];

fn init_logging(cfg: &LoggingConfig) -> anyhow::Result<()> {
    let level = cfg.level.trim().to_ascii_lowercase();
    let default_filter = CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let file_layer = match cfg.file.trim() {
        "" => None,
        path => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {path}"))?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;
    Ok(())
}

/// Resolves on Ctrl+C. The listener is installed right away so a signal that
/// arrives mid-cycle is seen once the cycle finishes.
fn shutdown_signal() -> impl Future<Output = ()> {
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received, finishing current cycle");
                let _ = tx.send(());
            }
            Err(e) => error!("Failed to listen for Ctrl+C: {}", e),
        }
    });
    async move {
        if rx.await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = match config::load_config(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            init_logging(&LoggingConfig {
                file: String::new(),
                ..LoggingConfig::default()
            })?;
            error!("{}", e);
            std::process::exit(1);
        }
    };
    init_logging(&cfg.logging)?;

    info!("🎯 Slip generator starting up...");
    info!("Source: {}", cfg.source.url);
    info!(
        "Filters: min_edge={}%, leagues={:?}, max_legs={}",
        cfg.filters.min_edge_percent, cfg.filters.leagues, cfg.filters.max_legs
    );
    if cli.dry_run {
        warn!("Dry run: slips will be logged, not sent");
    }

    let telegram = TelegramClient::new(cfg.notify.bot_token.clone())
        .context("failed to build Telegram client")?;
    let notifier = SlipNotifier::from_config(Box::new(telegram), &cfg.notify);

    if cli.check_notify {
        return match notifier.send_test().await.context("Telegram test failed")? {
            NotifyOutcome::Sent => {
                info!("Telegram test message sent");
                Ok(())
            }
            other => anyhow::bail!("Telegram test not sent: {:?}", other),
        };
    }

    let fetcher =
        OddsJamClient::from_config(&cfg.source).context("failed to build source HTTP client")?;
    let extractor = PropExtractor::new(&cfg.target.base_url, cfg.target.query_param.clone())
        .context("invalid target configuration")?;

    let mut generator =
        SlipGenerator::new(&cfg, Box::new(fetcher), extractor, notifier, cli.dry_run);

    let mut schedule = cfg.schedule.clone();
    if cli.once {
        schedule.enabled = false;
    }
    let cycles = schedule::run(&mut generator, &schedule, shutdown_signal()).await;

    info!("Slip generator stopped after {} cycle(s)", cycles);
    Ok(())
}
