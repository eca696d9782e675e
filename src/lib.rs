// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod models;
pub mod release;
pub mod snapshot;
pub mod utils;

pub use config::{Config, ReleaseConfig, SourceConfig};
pub use error::{Result, SdnError};
pub use extractor::{FeatureExtractor, XBT_FEATURE_LABEL, extract_bitcoin_addresses};
pub use fetcher::{SDN_URL, SdnFetcher};
pub use models::AddressSet;
pub use release::{BumpType, ReleasePipeline, Version};
