// file: src/snapshot.rs
// description: bundled static snapshot of sanctioned Bitcoin addresses
// reference: pre-generated from a prior fetch of the SDN export

use lazy_static::lazy_static;

static RAW_SNAPSHOT: &str = include_str!("data/addresses.json");

lazy_static! {
    static ref ADDRESSES: Vec<String> =
        serde_json::from_str(RAW_SNAPSHOT).expect("bundled snapshot is valid JSON");
}

/// The sanctioned Bitcoin addresses captured at the last snapshot refresh.
///
/// This is pre-validated data committed at build time; unlike the live fetch
/// it cannot fail at runtime.
pub fn bitcoin_addresses() -> &'static [String] {
    &ADDRESSES
}

/// Number of addresses in the bundled snapshot, as reported to the release
/// pipeline.
pub fn address_count() -> usize {
    ADDRESSES.len()
}
