use serde::Deserialize;

/// Default location of the site pages
pub const DEFAULT_BASE_URL: &str = "https://alpha.wallhaven.cc";

/// Default host of the short links handed out for each wallpaper
pub const DEFAULT_SHORT_URL_BASE: &str = "https://whvn.cc";

/// Default location of full-size wallpaper files
pub const DEFAULT_ASSET_BASE_URL: &str = "https://wallpapers.wallhaven.cc/wallpapers/full";

/// Main configuration structure for the Wallhaven client
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub site: SiteConfig,
    pub auth: AuthConfig,
    pub http: HttpConfig,
}

impl ClientConfig {
    /// Builds a configuration with the given credentials and default everything else
    pub fn with_credentials(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            auth: AuthConfig {
                username: Some(username.into()),
                password: Some(password.into()),
            },
            ..Self::default()
        }
    }
}

/// Where the site lives
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Root of the site: home page, search, wallpaper pages and auth routes
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Host used to build short links
    #[serde(rename = "short-url-base")]
    pub short_url_base: String,

    /// Directory URL holding the full-size wallpaper files
    #[serde(rename = "asset-base-url")]
    pub asset_base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            short_url_base: DEFAULT_SHORT_URL_BASE.to_string(),
            asset_base_url: DEFAULT_ASSET_BASE_URL.to_string(),
        }
    }
}

/// Account credentials
///
/// Both are optional; without them the client stays anonymous.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl AuthConfig {
    /// Returns the credentials when both are present and non-empty
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let username = self.username.as_deref().filter(|u| !u.is_empty())?;
        let password = self.password.as_deref().filter(|p| !p.is_empty())?;
        Some((username, password))
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Transport configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Reject invalid TLS certificates
    #[serde(rename = "verify-certificates")]
    pub verify_certificates: bool,

    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Whole-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            verify_certificates: true,
            user_agent: format!("wallhaven-client/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}
