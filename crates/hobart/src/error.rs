//! Error types for the core crate.

use thiserror::Error;

/// Errors that can occur while constructing a ticker universe.
///
/// These are the only startup-fatal errors in the system: a process that
/// cannot build its watchlist exits nonzero.
#[derive(Debug, Error)]
pub enum UniverseError {
    /// The watchlist contains no symbols.
    #[error("watchlist is empty")]
    Empty,

    /// The same symbol appears more than once.
    #[error("duplicate symbol in watchlist: {0}")]
    DuplicateSymbol(String),

    /// A watchlist file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
