#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod changes;
pub mod error;
pub mod universe;

// Re-export the data layer for consumers of the core crate
pub use hobart_data as data;

pub use changes::{ChangeResult, compute_changes};
pub use error::UniverseError;
pub use universe::{Universe, watchlist::Watchlist};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
