//! Hobart CLI binary.
//!
//! Polls Yahoo Finance for end-of-day closes across a fixed watchlist,
//! computes each ticker's change versus its previous close, and renders a
//! periodically refreshing sector-grouped terminal report.

mod integration;
mod monitor;

use clap::{Parser, ValueEnum};
use hobart::universe::watchlist::Watchlist;
use hobart_data::yahoo::profile::YahooProfileProvider;
use hobart_data::yahoo::quotes::{FetchWindow, YahooCloseProvider};
use log::info;
use monitor::{Monitor, TokioClock};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "hobart")]
#[command(about = "Sector-grouped daily change monitor", long_about = None)]
#[command(version)]
struct Cli {
    /// Sector cache file (defaults to the platform cache directory)
    #[arg(long)]
    cache: Option<PathBuf>,

    /// Seconds to sleep between refresh cycles
    #[arg(long, default_value = "10")]
    refresh: u64,

    /// Trailing window requested from the provider (e.g. "5d")
    #[arg(long, default_value = "5d")]
    range: String,

    /// Bar interval requested from the provider (e.g. "1d")
    #[arg(long, default_value = "1d")]
    interval: String,

    /// Milliseconds to pause between sector lookups during cache bootstrap
    #[arg(long, default_value = "250")]
    pacing_ms: u64,

    /// Request timeout in seconds for sector lookups
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// Watchlist file with one symbol per line ('#' starts a comment)
    #[arg(long)]
    watchlist: Option<PathBuf>,

    /// When to emit ANSI colors
    #[arg(long, value_enum, default_value = "auto")]
    color: ColorMode,
}

/// Color policy for report output.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorMode {
    /// Color only when stdout is a terminal
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

impl ColorMode {
    fn apply(self) {
        match self {
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
            Self::Auto => {
                if !atty::is(atty::Stream::Stdout) {
                    colored::control::set_override(false);
                }
            }
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    cli.color.apply();

    let watchlist = match &cli.watchlist {
        Some(path) => Watchlist::from_file(path)?,
        None => Watchlist::new(),
    };

    let cache_path = cli.cache.unwrap_or_else(integration::default_cache_path);
    let lookup = YahooProfileProvider::with_timeout(Duration::from_secs(cli.timeout));
    let sectors = integration::bootstrap_sectors(
        &cache_path,
        watchlist.symbols(),
        &lookup,
        Duration::from_millis(cli.pacing_ms),
    )
    .await;

    let monitor = Monitor::new(
        watchlist.symbols().to_vec(),
        sectors,
        FetchWindow {
            range: cli.range,
            interval: cli.interval,
        },
        Duration::from_secs(cli.refresh),
        YahooCloseProvider::new(),
        TokioClock,
    );

    tokio::select! {
        _ = monitor.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown requested, exiting.");
        }
    }

    Ok(())
}
