//! Per-cycle change calculation.
//!
//! Each ticker is processed independently: a failure to extract two valid
//! closes for one ticker never affects any other ticker's result.

use hobart_data::cache::{SectorMap, UNKNOWN_SECTOR};
use hobart_data::yahoo::quotes::CloseTable;

/// Closes required to compute a change.
const MIN_CLOSES: usize = 2;

/// One ticker's computed result for one cycle.
///
/// Exactly one of `percent_change` and `error` is populated. Results are
/// created fresh every cycle and discarded after rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeResult {
    /// Ticker symbol.
    pub ticker: String,
    /// Sector label from the cache, `"Unknown"` if absent.
    pub sector: String,
    /// Previous close (second-to-last in the fetched window).
    pub previous: Option<f64>,
    /// Current close (last in the fetched window).
    pub current: Option<f64>,
    /// Percent change versus the previous close.
    pub percent_change: Option<f64>,
    /// Why no change could be computed.
    pub error: Option<String>,
}

impl ChangeResult {
    /// A successfully computed change.
    pub fn valid(
        ticker: impl Into<String>,
        sector: impl Into<String>,
        previous: f64,
        current: f64,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            sector: sector.into(),
            previous: Some(previous),
            current: Some(current),
            percent_change: Some(percent_change(previous, current)),
            error: None,
        }
    }

    /// A per-ticker failure.
    pub fn failed(
        ticker: impl Into<String>,
        sector: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            sector: sector.into(),
            previous: None,
            current: None,
            percent_change: None,
            error: Some(message.into()),
        }
    }

    /// True when a change was computed for this ticker.
    pub const fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// Percent change of `current` versus `previous`.
fn percent_change(previous: f64, current: f64) -> f64 {
    (current - previous) / previous * 100.0
}

/// Compute one [`ChangeResult`] per symbol, in universe order.
pub fn compute_changes(
    symbols: &[String],
    sectors: &SectorMap,
    table: &CloseTable,
) -> Vec<ChangeResult> {
    symbols
        .iter()
        .map(|symbol| {
            let sector = sectors
                .get(symbol)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_SECTOR.to_string());

            match table.closes(symbol) {
                None => ChangeResult::failed(symbol, sector, "no price data returned"),
                Some(points) if points.len() < MIN_CLOSES => ChangeResult::failed(
                    symbol,
                    sector,
                    format!(
                        "insufficient history ({} of {} closes)",
                        points.len(),
                        MIN_CLOSES
                    ),
                ),
                Some(points) => {
                    let previous = points[points.len() - 2].close;
                    let current = points[points.len() - 1].close;
                    ChangeResult::valid(symbol, sector, previous, current)
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use hobart_data::yahoo::quotes::ClosePoint;
    use rstest::rstest;

    fn series(closes: &[f64]) -> Vec<ClosePoint> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| ClosePoint {
                date: NaiveDate::from_ymd_opt(2026, 8, 1 + i as u32).unwrap(),
                close,
            })
            .collect()
    }

    fn symbols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[rstest]
    #[case(100.0, 102.0, 2.0)]
    #[case(50.0, 49.0, -2.0)]
    #[case(80.0, 80.0, 0.0)]
    #[case(10.0, 15.0, 50.0)]
    fn test_percent_change_formula(#[case] previous: f64, #[case] current: f64, #[case] expected: f64) {
        let mut table = CloseTable::new();
        table.insert("SPY", series(&[previous, current]));

        let results = compute_changes(&symbols(&["SPY"]), &SectorMap::new(), &table);

        assert_eq!(results.len(), 1);
        assert_relative_eq!(results[0].percent_change.unwrap(), expected, max_relative = 1e-12);
        assert_eq!(results[0].previous, Some(previous));
        assert_eq!(results[0].current, Some(current));
    }

    #[test]
    fn test_change_uses_last_two_closes() {
        let mut table = CloseTable::new();
        table.insert("SPY", series(&[90.0, 95.0, 100.0, 102.0]));

        let results = compute_changes(&symbols(&["SPY"]), &SectorMap::new(), &table);

        assert_eq!(results[0].previous, Some(100.0));
        assert_eq!(results[0].current, Some(102.0));
    }

    #[test]
    fn test_insufficient_history_is_error() {
        let mut table = CloseTable::new();
        table.insert("SPY", series(&[100.0]));

        let results = compute_changes(&symbols(&["SPY"]), &SectorMap::new(), &table);

        assert!(!results[0].is_valid());
        assert!(results[0].error.as_ref().unwrap().contains("insufficient history"));
        assert!(results[0].percent_change.is_none());
    }

    #[test]
    fn test_absent_symbol_is_error() {
        let table = CloseTable::new();

        let results = compute_changes(&symbols(&["XYZ"]), &SectorMap::new(), &table);

        assert_eq!(results[0].error.as_deref(), Some("no price data returned"));
    }

    #[test]
    fn test_exactly_one_of_change_or_error() {
        let mut table = CloseTable::new();
        table.insert("SPY", series(&[100.0, 102.0]));
        table.insert("AAPL", series(&[50.0]));

        let results = compute_changes(&symbols(&["SPY", "AAPL", "XYZ"]), &SectorMap::new(), &table);

        for result in &results {
            assert_ne!(
                result.percent_change.is_some(),
                result.error.is_some(),
                "exactly one of percent_change/error must be set for {}",
                result.ticker
            );
        }
    }

    #[test]
    fn test_one_failure_does_not_affect_others() {
        let mut table = CloseTable::new();
        table.insert("SPY", series(&[100.0, 102.0]));
        table.insert("XOM", series(&[40.0, 42.0]));

        let results = compute_changes(&symbols(&["SPY", "MISSING", "XOM"]), &SectorMap::new(), &table);

        assert_eq!(results.len(), 3);
        assert!(results[0].is_valid());
        assert!(!results[1].is_valid());
        assert!(results[2].is_valid());
        // Output stays in universe order.
        assert_eq!(results[0].ticker, "SPY");
        assert_eq!(results[1].ticker, "MISSING");
        assert_eq!(results[2].ticker, "XOM");
    }

    #[test]
    fn test_sector_falls_back_to_unknown() {
        let mut sectors = SectorMap::new();
        sectors.insert("SPY".to_string(), "ETF".to_string());

        let mut table = CloseTable::new();
        table.insert("SPY", series(&[100.0, 102.0]));
        table.insert("AAPL", series(&[50.0, 49.0]));

        let results = compute_changes(&symbols(&["SPY", "AAPL"]), &sectors, &table);

        assert_eq!(results[0].sector, "ETF");
        assert_eq!(results[1].sector, UNKNOWN_SECTOR);
    }
}
