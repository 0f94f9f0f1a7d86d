//! The scheduler loop: fetch, compute, render, sleep, forever.
//!
//! The loop has top-level failure isolation: a failed cycle (including a
//! wholesale fetch failure) is logged and the loop proceeds to sleep; the
//! next iteration is the retry mechanism.

use hobart::changes::compute_changes;
use hobart_data::Result as DataResult;
use hobart_data::cache::SectorMap;
use hobart_data::yahoo::quotes::{FetchWindow, PriceSource};
use hobart_output::{Report, build_report, render};
use log::{error, info, warn};
use std::time::Duration;

/// Sleep capability injected into the monitor so tests can simulate N
/// cycles without real-time waiting.
#[allow(async_fn_in_trait)]
pub(crate) trait Clock {
    /// Sleep for the given duration.
    async fn sleep(&self, duration: Duration);
}

/// Production clock backed by the tokio timer.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TokioClock;

impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// The refresh loop over a price source and a clock.
#[derive(Debug)]
pub(crate) struct Monitor<P, C> {
    symbols: Vec<String>,
    sectors: SectorMap,
    window: FetchWindow,
    refresh: Duration,
    source: P,
    clock: C,
}

impl<P: PriceSource, C: Clock> Monitor<P, C> {
    pub(crate) fn new(
        symbols: Vec<String>,
        sectors: SectorMap,
        window: FetchWindow,
        refresh: Duration,
        source: P,
        clock: C,
    ) -> Self {
        Self {
            symbols,
            sectors,
            window,
            refresh,
            source,
            clock,
        }
    }

    /// Run one fetch/compute/assemble pass.
    async fn cycle(&self) -> DataResult<Report> {
        info!("Fetching price data...");
        let table = self.source.fetch_closes(&self.symbols, &self.window).await?;
        let results = compute_changes(&self.symbols, &self.sectors, &table);
        Ok(build_report(&results))
    }

    /// Run one cycle with top-level failure isolation.
    ///
    /// Returns whether the cycle produced a report.
    async fn tick(&self) -> bool {
        match self.cycle().await {
            Ok(report) => {
                if !report.has_rows() {
                    warn!("No valid symbols to display.");
                }
                let text = render(&report);
                if !text.is_empty() {
                    print!("{}", text);
                    let _ = std::io::Write::flush(&mut std::io::stdout());
                }
                true
            }
            Err(e) => {
                error!("Fetch/display error: {}", e);
                false
            }
        }
    }

    /// Run a bounded number of cycles; returns how many succeeded.
    pub(crate) async fn run_cycles(&self, cycles: usize) -> usize {
        let mut succeeded = 0;
        for _ in 0..cycles {
            if self.tick().await {
                succeeded += 1;
            }
            info!("Sleeping {} seconds...", self.refresh.as_secs());
            self.clock.sleep(self.refresh).await;
        }
        succeeded
    }

    /// Alternate between fetching and sleeping until externally stopped.
    pub(crate) async fn run(&self) {
        loop {
            self.run_cycles(1).await;
        }
    }
}
