//! Configuration module for the Wallhaven client
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional, so an empty file yields an anonymous client
//! pointed at the public site.
//!
//! # Example
//!
//! ```no_run
//! use wallhaven_client::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("wallhaven.toml")).unwrap();
//! println!("Site: {}", config.site.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    AuthConfig, ClientConfig, HttpConfig, SiteConfig, DEFAULT_ASSET_BASE_URL, DEFAULT_BASE_URL,
    DEFAULT_SHORT_URL_BASE,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
