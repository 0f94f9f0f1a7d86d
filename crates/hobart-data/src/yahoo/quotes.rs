//! Close-price fetching from Yahoo Finance.

use crate::error::{DataError, Result};
use chrono::{DateTime, NaiveDate};
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use yahoo_finance_api as yahoo;

/// A closing price for one trading day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosePoint {
    /// Trading date.
    pub date: NaiveDate,
    /// Closing price.
    pub close: f64,
}

/// Closing prices per symbol for one fetch cycle.
///
/// Each series is ordered by date. Missing trading days are simply absent;
/// non-finite and non-positive closes are treated as missing and dropped at
/// insertion.
#[derive(Debug, Clone, Default)]
pub struct CloseTable {
    series: HashMap<String, Vec<ClosePoint>>,
}

impl CloseTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a symbol's close series, dropping invalid points and sorting by date.
    pub fn insert(&mut self, symbol: impl Into<String>, mut points: Vec<ClosePoint>) {
        points.retain(|p| p.close.is_finite() && p.close > 0.0);
        points.sort_by_key(|p| p.date);
        self.series.insert(symbol.into(), points);
    }

    /// Get the close series for a symbol, if the fetch returned one.
    pub fn closes(&self, symbol: &str) -> Option<&[ClosePoint]> {
        self.series.get(symbol).map(Vec::as_slice)
    }

    /// Number of symbols with a series in the table.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// True when no symbol produced any closes.
    pub fn is_empty(&self) -> bool {
        self.series.values().all(Vec::is_empty)
    }
}

/// Trailing window requested from the provider.
#[derive(Debug, Clone)]
pub struct FetchWindow {
    /// Lookback range (e.g. "5d").
    pub range: String,
    /// Bar interval (e.g. "1d").
    pub interval: String,
}

impl Default for FetchWindow {
    fn default() -> Self {
        Self {
            range: "5d".to_string(),
            interval: "1d".to_string(),
        }
    }
}

/// A source of batched close-price data.
#[allow(async_fn_in_trait)]
pub trait PriceSource {
    /// Fetch closing prices for all symbols over the given window.
    ///
    /// Individual symbols may be missing from the result; an error is
    /// returned only when the batch as a whole produced no data.
    async fn fetch_closes(&self, symbols: &[String], window: &FetchWindow) -> Result<CloseTable>;
}

/// Default number of concurrent per-symbol requests.
const DEFAULT_CONCURRENCY: usize = 8;

/// Yahoo Finance close-price provider.
///
/// One logical batched fetch per call, issued as per-symbol range requests
/// driven through a bounded concurrent stream.
pub struct YahooCloseProvider {
    provider: yahoo::YahooConnector,
    concurrency: usize,
}

impl std::fmt::Debug for YahooCloseProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooCloseProvider")
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}

impl YahooCloseProvider {
    /// Create a new provider with default request concurrency.
    pub fn new() -> Self {
        Self::with_concurrency(DEFAULT_CONCURRENCY)
    }

    /// Create a new provider with custom request concurrency.
    pub fn with_concurrency(concurrency: usize) -> Self {
        Self {
            provider: yahoo::YahooConnector::new().expect("Failed to create Yahoo connector"),
            concurrency: concurrency.max(1),
        }
    }

    /// Fetch the close series for a single symbol.
    async fn fetch_one(&self, symbol: &str, window: &FetchWindow) -> Result<Vec<ClosePoint>> {
        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        let response = self
            .provider
            .get_quote_range(symbol, &window.interval, &window.range)
            .await?;

        let quotes = response
            .quotes()
            .map_err(|e| DataError::YahooApi(e.to_string()))?;

        let points = quotes
            .iter()
            .filter_map(|q| {
                let date = DateTime::from_timestamp(q.timestamp, 0)?.date_naive();
                Some(ClosePoint {
                    date,
                    close: q.close,
                })
            })
            .collect();

        Ok(points)
    }
}

impl PriceSource for YahooCloseProvider {
    async fn fetch_closes(&self, symbols: &[String], window: &FetchWindow) -> Result<CloseTable> {
        let fetched: Vec<(String, Result<Vec<ClosePoint>>)> = stream::iter(symbols.iter().cloned())
            .map(|symbol| async move {
                let points = self.fetch_one(&symbol, window).await;
                (symbol, points)
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let mut table = CloseTable::new();
        for (symbol, result) in fetched {
            match result {
                Ok(points) if !points.is_empty() => table.insert(symbol, points),
                Ok(_) => log::warn!("No quotes returned for {}", symbol),
                Err(e) => log::warn!("Failed to fetch quotes for {}: {}", symbol, e),
            }
        }

        if table.is_empty() {
            return Err(DataError::MissingData {
                symbol: "batch".to_string(),
                reason: "no closing prices returned for any symbol".to_string(),
            });
        }

        Ok(table)
    }
}

impl Default for YahooCloseProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(ymd: (i32, u32, u32), close: f64) -> ClosePoint {
        ClosePoint {
            date: NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap(),
            close,
        }
    }

    #[test]
    fn test_insert_sorts_by_date() {
        let mut table = CloseTable::new();
        table.insert(
            "SPY",
            vec![point((2026, 8, 6), 102.0), point((2026, 8, 5), 100.0)],
        );

        let closes = table.closes("SPY").unwrap();
        assert_eq!(closes[0].close, 100.0);
        assert_eq!(closes[1].close, 102.0);
    }

    #[test]
    fn test_insert_drops_invalid_closes() {
        let mut table = CloseTable::new();
        table.insert(
            "SPY",
            vec![
                point((2026, 8, 4), f64::NAN),
                point((2026, 8, 5), 0.0),
                point((2026, 8, 6), 102.0),
            ],
        );

        assert_eq!(table.closes("SPY").unwrap().len(), 1);
    }

    #[test]
    fn test_missing_symbol_is_none() {
        let table = CloseTable::new();
        assert!(table.closes("XYZ").is_none());
    }

    #[test]
    fn test_empty_when_no_series_has_points() {
        let mut table = CloseTable::new();
        table.insert("SPY", vec![point((2026, 8, 4), f64::NAN)]);

        assert_eq!(table.len(), 1);
        assert!(table.is_empty());
    }

    #[test]
    fn test_default_window() {
        let window = FetchWindow::default();
        assert_eq!(window.range, "5d");
        assert_eq!(window.interval, "1d");
    }
}
