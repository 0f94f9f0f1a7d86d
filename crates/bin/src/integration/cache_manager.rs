//! Default location for the persisted sector cache.
//!
//! Uses platform-specific cache directories:
//! - Linux: `~/.cache/hobart/`
//! - macOS: `~/Library/Caches/hobart/`
//! - Windows: `%LOCALAPPDATA%\hobart\`

use std::path::PathBuf;

/// Get the default cache directory path.
pub(crate) fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hobart")
}

/// Get the default sector cache file path.
pub(crate) fn default_cache_path() -> PathBuf {
    default_cache_dir().join("sectors.json")
}
