//! Report assembly.
//!
//! Turning a cycle's change results into display rows is pure: grouping,
//! ordering, and partitioning happen here, styled emission happens in
//! [`crate::render`].

use hobart::changes::ChangeResult;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// One rendered table row.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    /// Ticker symbol.
    pub ticker: String,
    /// Previous close.
    pub previous: f64,
    /// Current close.
    pub current: f64,
    /// Percent change versus the previous close.
    pub percent_change: f64,
}

/// All rows for one sector, ordered by percent change descending.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorBlock {
    /// Sector label.
    pub sector: String,
    /// Rows in display order.
    pub rows: Vec<ReportRow>,
}

/// A ticker that produced no change this cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedTicker {
    /// Ticker symbol.
    pub ticker: String,
    /// Why it failed.
    pub message: String,
}

/// One cycle's assembled report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    /// Sector blocks in lexicographic sector order.
    pub blocks: Vec<SectorBlock>,
    /// Failed tickers in universe order.
    pub failures: Vec<FailedTicker>,
}

impl Report {
    /// True when at least one sector block has rows to display.
    pub fn has_rows(&self) -> bool {
        !self.blocks.is_empty()
    }
}

/// Assemble a cycle's results into a [`Report`].
///
/// Valid results are grouped by sector (sectors in lexicographic order) and
/// sorted within each sector by percent change descending; the sort is
/// stable, so ties keep universe order. Failed results are listed separately
/// in universe order.
pub fn build_report(results: &[ChangeResult]) -> Report {
    let mut by_sector: BTreeMap<String, Vec<ReportRow>> = BTreeMap::new();
    let mut failures = Vec::new();

    for result in results {
        if let Some(message) = &result.error {
            failures.push(FailedTicker {
                ticker: result.ticker.clone(),
                message: message.clone(),
            });
        } else if let (Some(previous), Some(current), Some(percent_change)) =
            (result.previous, result.current, result.percent_change)
        {
            by_sector
                .entry(result.sector.clone())
                .or_default()
                .push(ReportRow {
                    ticker: result.ticker.clone(),
                    previous,
                    current,
                    percent_change,
                });
        } else {
            // A processed ticker must carry either a change or an error;
            // anything else is surfaced rather than dropped.
            failures.push(FailedTicker {
                ticker: result.ticker.clone(),
                message: "no computed change".to_string(),
            });
        }
    }

    let blocks = by_sector
        .into_iter()
        .map(|(sector, mut rows)| {
            rows.sort_by(|a, b| {
                b.percent_change
                    .partial_cmp(&a.percent_change)
                    .unwrap_or(Ordering::Equal)
            });
            SectorBlock { sector, rows }
        })
        .collect();

    Report { blocks, failures }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid(ticker: &str, sector: &str, previous: f64, current: f64) -> ChangeResult {
        ChangeResult::valid(ticker, sector, previous, current)
    }

    #[test]
    fn test_rows_sorted_by_change_descending() {
        let results = vec![
            valid("AAA", "Tech", 100.0, 101.0),
            valid("BBB", "Tech", 100.0, 105.0),
            valid("CCC", "Tech", 100.0, 98.0),
        ];

        let report = build_report(&results);
        let tickers: Vec<&str> = report.blocks[0]
            .rows
            .iter()
            .map(|r| r.ticker.as_str())
            .collect();

        assert_eq!(tickers, ["BBB", "AAA", "CCC"]);
    }

    #[test]
    fn test_ties_keep_universe_order() {
        let results = vec![
            valid("AAA", "Tech", 100.0, 102.0),
            valid("BBB", "Tech", 50.0, 51.0),
            valid("CCC", "Tech", 200.0, 204.0),
        ];

        let report = build_report(&results);
        let tickers: Vec<&str> = report.blocks[0]
            .rows
            .iter()
            .map(|r| r.ticker.as_str())
            .collect();

        assert_eq!(tickers, ["AAA", "BBB", "CCC"]);
    }

    #[test]
    fn test_sectors_in_lexicographic_order() {
        let results = vec![
            valid("XOM", "Energy", 40.0, 41.0),
            valid("SPY", "ETF", 100.0, 102.0),
            valid("T", "Communication Services", 20.0, 19.0),
        ];

        let report = build_report(&results);
        let sectors: Vec<&str> = report.blocks.iter().map(|b| b.sector.as_str()).collect();

        assert_eq!(sectors, ["Communication Services", "ETF", "Energy"]);
    }

    #[test]
    fn test_failures_partitioned_out() {
        let results = vec![
            valid("SPY", "ETF", 100.0, 102.0),
            ChangeResult::failed("XYZ", "Unknown", "no price data returned"),
        ];

        let report = build_report(&results);

        assert_eq!(report.blocks.len(), 1);
        assert_eq!(report.blocks[0].rows.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].ticker, "XYZ");
    }

    #[test]
    fn test_all_failed_has_no_rows() {
        let results = vec![
            ChangeResult::failed("SPY", "ETF", "insufficient history (1 of 2 closes)"),
            ChangeResult::failed("XYZ", "Unknown", "no price data returned"),
        ];

        let report = build_report(&results);

        assert!(!report.has_rows());
        assert_eq!(report.failures.len(), 2);
    }

    #[test]
    fn test_empty_input_is_empty_report() {
        let report = build_report(&[]);

        assert!(!report.has_rows());
        assert!(report.failures.is_empty());
    }
}
