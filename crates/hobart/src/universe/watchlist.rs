//! The monitored ticker watchlist.

use crate::error::UniverseError;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Ordered, duplicate-free list of monitored ticker symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Watchlist {
    symbols: Vec<String>,
}

impl Watchlist {
    /// Create the default watchlist.
    pub fn new() -> Self {
        Self {
            symbols: Self::default_symbols(),
        }
    }

    /// Create a watchlist from an explicit symbol list.
    pub fn from_symbols(symbols: Vec<String>) -> Result<Self, UniverseError> {
        if symbols.is_empty() {
            return Err(UniverseError::Empty);
        }

        let mut seen = HashSet::new();
        for symbol in &symbols {
            if !seen.insert(symbol.as_str()) {
                return Err(UniverseError::DuplicateSymbol(symbol.clone()));
            }
        }

        Ok(Self { symbols })
    }

    /// Read a watchlist file: one symbol per line, blank lines and `#`
    /// comments ignored.
    pub fn from_file(path: &Path) -> Result<Self, UniverseError> {
        let contents = fs::read_to_string(path)?;
        let symbols = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();

        Self::from_symbols(symbols)
    }

    /// Get all symbols, in watchlist order.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Default watchlist symbols.
    ///
    /// Grouped by sector for readability only; the report's sector grouping
    /// comes from the sector cache, not from this ordering.
    fn default_symbols() -> Vec<String> {
        [
            // ETFs
            "SPY", "QQQ",
            // Consumer Defensive
            "PEP", "KO", "COST", "WMT",
            // Consumer Cyclical
            "AMZN", "BABA", "F", "TSLA", "NIO", "MCD", "DKNG", "MELI", "SE", "EBAY", "BKNG",
            "DASH", "WEN",
            // Communication Services
            "PINS", "SNAP", "RDDT", "META", "GOOG", "T", "AMC", "TTWO", "NFLX", "VZ", "BIDU",
            "ROKU", "DIS", "SONY", "SPOT", "MTCH",
            // Technology
            "DELL", "NVDA", "AMD", "AVGO", "TSM", "MU", "ORCL", "AAPL", "PLTR", "INTC", "QUBT",
            "MSFT", "ADBE", "QCOM", "ASML", "AMAT", "ADP", "IBM", "CRM", "NOW", "SHOP", "PANW",
            "CRWD", "MDB", "ZS", "DDOG", "ARM", "LRCX", "KLAC", "NXPI", "ON", "MRVL", "UBER",
            // Financial Services
            "PYPL", "HOOD", "V", "JPM", "AXP", "GS", "MA", "SQ", "COIN", "C", "BAC", "MS",
            // Healthcare
            "LLY", "UNH", "JNJ", "AMGN", "PFE", "MRK", "ABBV", "REGN", "BMY",
            // Industrials
            "CTAS", "BA", "CAT", "GE", "HON", "LMT", "RTX",
            // Energy
            "XOM", "CVX",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }
}

impl Default for Watchlist {
    fn default() -> Self {
        Self::new()
    }
}
