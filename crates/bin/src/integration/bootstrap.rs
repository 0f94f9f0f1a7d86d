//! One-time sector cache bootstrap with progress feedback.

use hobart_data::cache::{self, SectorMap};
use hobart_data::yahoo::profile::SectorLookup;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Ensure the sector cache covers every watchlist symbol, showing a spinner
/// while lookups run. Built exactly once, before the first cycle.
pub(crate) async fn bootstrap_sectors<L: SectorLookup>(
    path: &Path,
    symbols: &[String],
    lookup: &L,
    pacing: Duration,
) -> SectorMap {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Checking sector cache...");

    let sectors = cache::ensure(path, symbols, lookup, pacing).await;

    spinner.finish_with_message(format!("Sector cache ready ({} symbols)", sectors.len()));
    sectors
}
