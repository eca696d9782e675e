// file: src/fetcher.rs
// description: HTTP retrieval of the SDN advanced export
// reference: https://sanctionslistservice.ofac.treas.gov

use crate::error::{Result, SdnError};
use crate::extractor::extract_bitcoin_addresses;
use reqwest::Client;
use tracing::{debug, info};

/// Public OFAC endpoint serving the advanced SDN XML export.
pub const SDN_URL: &str =
    "https://sanctionslistservice.ofac.treas.gov/api/publicationpreview/exports/sdn_advanced.xml";

/// Fetches the SDN export over HTTPS and hands it to the extractor.
///
/// No retry, no caching, no internal timeout; callers wanting bounded latency
/// wrap the call in their own deadline.
pub struct SdnFetcher {
    client: Client,
    url: String,
}

impl SdnFetcher {
    pub fn new() -> Self {
        Self::with_url(SDN_URL)
    }

    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Downloads the raw export body.
    pub async fn fetch_document(&self) -> Result<String> {
        debug!("fetching SDN export from {}", self.url);

        let response = self.client.get(&self.url).send().await?;
        if !response.status().is_success() {
            return Err(SdnError::Status(response.status()));
        }

        let body = response.text().await?;
        debug!("fetched SDN export, {} bytes", body.len());
        Ok(body)
    }

    /// Fetches the export and extracts the sanctioned Bitcoin addresses.
    pub async fn fetch_bitcoin_addresses(&self) -> Result<Vec<String>> {
        let document = self.fetch_document().await?;
        let addresses = extract_bitcoin_addresses(&document)?;
        info!("SDN export yielded {} sanctioned Bitcoin addresses", addresses.len());
        Ok(addresses)
    }
}

impl Default for SdnFetcher {
    fn default() -> Self {
        Self::new()
    }
}
