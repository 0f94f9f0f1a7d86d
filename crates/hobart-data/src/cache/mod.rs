//! Caching layer for sector classifications.

pub mod sectors;

pub use sectors::{SectorMap, UNKNOWN_SECTOR, ensure, load, persist};
