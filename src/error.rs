// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SdnError>;

#[derive(Error, Debug)]
pub enum SdnError {
    #[error("feature type labeled {0:?} not found in SDN export")]
    CategoryNotFound(String),

    #[error("SDN fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("SDN endpoint returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Release step failed: {0}")]
    Release(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
