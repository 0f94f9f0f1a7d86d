//! Flat-file JSON cache mapping ticker symbols to sector labels.
//!
//! The cache is bootstrapped once per symbol via an external lookup and
//! reused indefinitely across runs. Entries loaded from disk are never
//! overwritten; only symbols absent from the loaded cache trigger a lookup.

use crate::error::Result;
use crate::yahoo::profile::SectorLookup;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tokio::time::sleep;

/// Mapping from ticker symbol to sector label.
pub type SectorMap = BTreeMap<String, String>;

/// Sector label recorded when a lookup fails or no entry exists.
pub const UNKNOWN_SECTOR: &str = "Unknown";

/// Load the sector cache from disk.
///
/// Returns an empty map if the file is absent, unreadable, or not a JSON
/// object of strings. Never fails; problems are logged as warnings.
pub fn load(path: &Path) -> SectorMap {
    if !path.exists() {
        return SectorMap::new();
    }

    match fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str::<SectorMap>(&contents) {
            Ok(sectors) => {
                log::info!("Loaded sector cache from {}", path.display());
                sectors
            }
            Err(e) => {
                log::warn!("Failed to parse sector cache: {}", e);
                SectorMap::new()
            }
        },
        Err(e) => {
            log::warn!("Failed to read sector cache: {}", e);
            SectorMap::new()
        }
    }
}

/// Write the full sector cache to disk, creating parent directories as needed.
pub fn persist(path: &Path, sectors: &SectorMap) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let contents = serde_json::to_string(sectors)?;
    fs::write(path, contents)?;
    Ok(())
}

/// Load the cache and fill in any symbols it does not yet cover.
///
/// Only the missing subset is looked up; existing entries are never
/// overwritten. Individual lookup failures are recorded as [`UNKNOWN_SECTOR`]
/// and do not abort the batch. The merged result is re-persisted; a write
/// failure is downgraded to a warning and the in-memory map is still
/// returned. A fixed pacing delay runs between individual lookups.
pub async fn ensure<L: SectorLookup>(
    path: &Path,
    symbols: &[String],
    lookup: &L,
    pacing: Duration,
) -> SectorMap {
    let mut sectors = load(path);

    let missing: Vec<&String> = symbols.iter().filter(|s| !sectors.contains_key(*s)).collect();
    if missing.is_empty() {
        return sectors;
    }

    log::info!("Building sector cache for {} new symbols...", missing.len());
    for symbol in missing {
        let sector = match lookup.lookup_sector(symbol).await {
            Ok(sector) => sector,
            Err(e) => {
                log::debug!("Sector lookup failed for {}: {}", symbol, e);
                UNKNOWN_SECTOR.to_string()
            }
        };
        sectors.entry(symbol.clone()).or_insert(sector);
        sleep(pacing).await;
    }

    match persist(path, &sectors) {
        Ok(()) => log::info!("Sector cache updated: {}", path.display()),
        Err(e) => log::warn!("Failed to write sector cache: {}", e),
    }

    sectors
}
