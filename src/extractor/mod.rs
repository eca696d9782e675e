// file: src/extractor/mod.rs
// description: SDN extraction module exports
// reference: internal module structure

pub mod patterns;
pub mod sdn;

pub use sdn::{FeatureExtractor, XBT_FEATURE_LABEL, extract_bitcoin_addresses};
