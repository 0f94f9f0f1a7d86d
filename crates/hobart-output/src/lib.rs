#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod render;
pub mod report;

pub use render::render;
pub use report::{FailedTicker, Report, ReportRow, SectorBlock, build_report};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
