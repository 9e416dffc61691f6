//! Client for the Wallhaven site
//!
//! This module contains every network operation:
//! - Session login/logout with the login form's anti-forgery token
//! - Lock-serialized request dispatch
//! - Listing and detail page extraction
//! - Tag and purity actions for signed-in sessions
//! - Wallpaper downloads

mod actions;
mod download;
mod entity;
mod fetcher;
mod listing;
mod session;

pub use download::{DEFAULT_CHUNK_SIZE, FALLBACK_EXTENSION, PRIMARY_EXTENSION};
pub use fetcher::{build_http_client, DocumentFetcher, FetchedPage};
pub use session::Session;

use crate::config::{validate, ClientConfig};
use crate::Result;
use tokio::sync::RwLock;
use url::Url;

/// Authenticated client for one Wallhaven session
///
/// A client can be shared between tasks (e.g. behind an `Arc`); all of its
/// requests are serialized, so parallel throughput needs separate clients.
///
/// # Example
///
/// ```no_run
/// use wallhaven_client::{ClientConfig, FieldSelection, WallhavenClient};
///
/// # async fn example() -> wallhaven_client::Result<()> {
/// let client = WallhavenClient::new(ClientConfig::with_credentials("someone", "hunter2")).await?;
/// let record = client.get_record("94x38z", &FieldSelection::default()).await?;
/// println!("{:?}", record.purity);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct WallhavenClient {
    config: ClientConfig,
    base_url: Url,
    fetcher: DocumentFetcher,
    session: RwLock<Session>,
}

impl WallhavenClient {
    /// Builds the client and attempts to log in once
    ///
    /// A failed login leaves an anonymous client; only transport failures
    /// and invalid configuration are errors.
    pub async fn new(config: ClientConfig) -> Result<Self> {
        let client = Self::anonymous(config)?;

        if !client.login().await? && client.config.auth.credentials().is_some() {
            tracing::warn!("Login failed, continuing without a session");
        }

        Ok(client)
    }

    /// Builds the client without attempting a login
    pub fn anonymous(config: ClientConfig) -> Result<Self> {
        validate(&config)?;

        let base_url = Url::parse(&config.site.base_url)?;
        let http = build_http_client(&config.http)?;

        Ok(Self {
            config,
            base_url,
            fetcher: DocumentFetcher::new(http),
            session: RwLock::new(Session::default()),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolves a site path against the configured base URL
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Detail page URL of a wallpaper
    pub fn wallpaper_url(&self, id: &str) -> Result<Url> {
        self.endpoint(&format!("/wallpaper/{}", id))
    }

    /// Short link of a wallpaper; never touches the network
    pub fn image_short_url(&self, id: &str) -> String {
        format!(
            "{}/{}",
            self.config.site.short_url_base.trim_end_matches('/'),
            id
        )
    }

    /// URL of the full-size file of a wallpaper for the given extension
    pub fn asset_url(&self, id: &str, extension: &str) -> String {
        format!(
            "{}/wallhaven-{}.{}",
            self.config.site.asset_base_url.trim_end_matches('/'),
            id,
            extension
        )
    }
}
