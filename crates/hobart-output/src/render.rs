//! Styled terminal emission.
//!
//! [`render`] is formatting only: it returns the finished text and the
//! caller decides where it goes. Whether color codes are actually emitted is
//! controlled globally via `colored::control` (see the binary's `--color`
//! flag).

use crate::report::Report;
use colored::Colorize;

/// Direction of a change, for color selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Up,
    Down,
    Flat,
}

fn tone(percent_change: f64) -> Tone {
    if percent_change > 0.0 {
        Tone::Up
    } else if percent_change < 0.0 {
        Tone::Down
    } else {
        Tone::Flat
    }
}

/// Render a report as fixed-width terminal text.
///
/// Number cells are padded before styling so escape codes never skew column
/// widths. Returns an empty string when there is nothing to show.
pub fn render(report: &Report) -> String {
    let mut out = String::new();

    if report.has_rows() {
        out.push_str("\nPrice Change - Close vs Previous Close\n");

        for block in &report.blocks {
            out.push_str(&format!("\nSector: {}\n", block.sector));
            out.push_str(&format!(
                "{:<6} {:>10} {:>10} {:>8}\n",
                "Ticker", "Prev", "Cur", "%Chg"
            ));

            for row in &block.rows {
                let change = format!("{:>7.2}%", row.percent_change);
                let styled = match tone(row.percent_change) {
                    Tone::Up => change.as_str().green(),
                    Tone::Down => change.as_str().red(),
                    Tone::Flat => change.as_str().dimmed(),
                };
                out.push_str(&format!(
                    "{:<6} {:>10.2} {:>10.2} {}\n",
                    row.ticker, row.previous, row.current, styled
                ));
            }
        }
    }

    if !report.failures.is_empty() {
        out.push_str("\nErrors:\n");
        for failure in &report.failures {
            out.push_str(&format!("{:<6} - {}\n", failure.ticker, failure.message));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{FailedTicker, ReportRow, SectorBlock};

    fn sample_report() -> Report {
        Report {
            blocks: vec![SectorBlock {
                sector: "ETF".to_string(),
                rows: vec![ReportRow {
                    ticker: "SPY".to_string(),
                    previous: 100.0,
                    current: 102.0,
                    percent_change: 2.0,
                }],
            }],
            failures: vec![FailedTicker {
                ticker: "XYZ".to_string(),
                message: "no price data returned".to_string(),
            }],
        }
    }

    #[test]
    fn test_tone_selection() {
        assert_eq!(tone(2.0), Tone::Up);
        assert_eq!(tone(-2.0), Tone::Down);
        assert_eq!(tone(0.0), Tone::Flat);
    }

    #[test]
    fn test_render_fixed_width_rows() {
        colored::control::set_override(false);
        let text = render(&sample_report());

        assert!(text.contains("Price Change - Close vs Previous Close"));
        assert!(text.contains("Sector: ETF"));
        assert!(text.contains("Ticker       Prev        Cur     %Chg"));
        assert!(text.contains("SPY        100.00     102.00    2.00%"));
    }

    #[test]
    fn test_render_failure_list() {
        colored::control::set_override(false);
        let text = render(&sample_report());

        assert!(text.contains("Errors:"));
        assert!(text.contains("XYZ    - no price data returned"));
    }

    #[test]
    fn test_render_plain_when_colors_disabled() {
        colored::control::set_override(false);
        let text = render(&sample_report());

        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_render_empty_report_is_empty() {
        colored::control::set_override(false);
        assert!(render(&Report::default()).is_empty());
    }

    #[test]
    fn test_render_failures_without_table() {
        colored::control::set_override(false);
        let report = Report {
            blocks: Vec::new(),
            failures: vec![FailedTicker {
                ticker: "SPY".to_string(),
                message: "insufficient history (1 of 2 closes)".to_string(),
            }],
        };

        let text = render(&report);

        assert!(!text.contains("Price Change"));
        assert!(text.contains("Errors:"));
    }
}
