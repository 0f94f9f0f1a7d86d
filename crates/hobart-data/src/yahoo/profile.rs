//! Sector lookups via Yahoo Finance asset profiles.

use crate::error::{DataError, Result};
use serde::Deserialize;
use std::time::Duration;

const QUOTE_SUMMARY_URL: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary";
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A collaborator that resolves a ticker symbol to a sector label.
#[allow(async_fn_in_trait)]
pub trait SectorLookup {
    /// Look up the sector for a single symbol.
    async fn lookup_sector(&self, symbol: &str) -> Result<String>;
}

/// Yahoo Finance asset-profile provider.
#[derive(Debug)]
pub struct YahooProfileProvider {
    client: reqwest::Client,
}

impl YahooProfileProvider {
    /// Create a new provider with the default request timeout.
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a new provider with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(timeout)
                .build()
                .expect("Failed to create HTTP client"),
        }
    }
}

impl Default for YahooProfileProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryEnvelope {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryBody,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryBody {
    result: Option<Vec<QuoteSummaryResult>>,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryResult {
    #[serde(rename = "assetProfile")]
    asset_profile: Option<AssetProfile>,
}

#[derive(Debug, Deserialize)]
struct AssetProfile {
    sector: Option<String>,
}

impl SectorLookup for YahooProfileProvider {
    async fn lookup_sector(&self, symbol: &str) -> Result<String> {
        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        let url = format!("{}/{}", QUOTE_SUMMARY_URL, symbol);
        let response = self
            .client
            .get(&url)
            .query(&[("modules", "assetProfile")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataError::Http(format!(
                "quoteSummary returned status {} for {}",
                status, symbol
            )));
        }

        let envelope: QuoteSummaryEnvelope = response.json().await?;

        envelope
            .quote_summary
            .result
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|r| r.asset_profile)
            .and_then(|p| p.sector)
            .ok_or_else(|| DataError::MissingData {
                symbol: symbol.to_string(),
                reason: "no sector in asset profile".to_string(),
            })
    }
}
