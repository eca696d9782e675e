// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod address_set;

pub use address_set::AddressSet;
