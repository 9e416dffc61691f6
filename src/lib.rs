//! Wallhaven client: an authenticated scraper for the Wallhaven gallery
//!
//! The site has no official API for the data this crate reads, so everything is
//! derived from the HTML pages a browser would see. The crate is split into:
//!
//! - [`client`]: the shared session, lock-serialized transport and all
//!   network operations (listing, detail pages, tag/purity actions, downloads)
//! - [`extract`]: pure HTML extraction, usable on documents fetched elsewhere
//! - [`model`]: the records and filters exchanged with callers
//! - [`config`]: TOML configuration

pub mod client;
pub mod config;
pub mod extract;
pub mod model;

use thiserror::Error;

/// Main error type for Wallhaven client operations
///
/// Only hard failures end up here. A page that returns a non-success status,
/// markup that is missing, or an action the server rejects are all reported
/// through the `Ok` value of the operation instead.
#[derive(Debug, Error)]
pub enum WallhavenError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Wallhaven client operations
pub type Result<T> = std::result::Result<T, WallhavenError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use client::WallhavenClient;
pub use config::ClientConfig;
pub use extract::{EntityPage, ListingPage};
pub use model::{EntityRecord, Field, FieldSelection, Purity, SearchFilters, Tag, Uploader};
