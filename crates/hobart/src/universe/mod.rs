//! Universe management for the Hobart monitor.
//!
//! The universe is a static, hand-maintained ordered list of symbols. The
//! sector grouping visible in the default watchlist source is presentation
//! only; sector truth comes from the persisted sector cache.

pub mod watchlist;

pub use watchlist::Watchlist;

/// Trait for ticker universes.
pub trait Universe {
    /// Get all symbols in the universe, in order.
    fn symbols(&self) -> Vec<String>;

    /// Check if a symbol is in the universe.
    fn contains(&self, symbol: &str) -> bool {
        self.symbols().contains(&symbol.to_string())
    }

    /// Get the number of constituents.
    fn size(&self) -> usize {
        self.symbols().len()
    }
}

impl Universe for Watchlist {
    fn symbols(&self) -> Vec<String> {
        self.symbols().to_vec()
    }
}
