//! Session state and the login handshake

use super::WallhavenClient;
use crate::extract::login_token;
use crate::Result;
use std::fmt;

/// Login state shared by every request of a client
///
/// Only [`WallhavenClient::login`] and [`WallhavenClient::logout`] change it.
/// The session cookie itself lives in the HTTP client's cookie jar.
#[derive(Clone, Default)]
pub struct Session {
    authenticated: bool,
    token: String,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Anti-forgery token of a signed-in session
    pub fn token(&self) -> Option<&str> {
        if self.authenticated {
            Some(&self.token)
        } else {
            None
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.authenticated)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl WallhavenClient {
    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_authenticated()
    }

    /// Token to attach to actions, None when not signed in
    pub(crate) async fn session_token(&self) -> Option<String> {
        self.session.read().await.token().map(str::to_string)
    }

    /// Logs in with the configured credentials
    ///
    /// # Handshake
    ///
    /// 1. GET the home page and read the login form's `_token`
    /// 2. POST username, password and token to `/auth/login`
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Signed in (or already was)
    /// * `Ok(false)` - No credentials, a non-success response, or no token
    ///   on the home page
    /// * `Err(WallhavenError)` - Transport failure
    pub async fn login(&self) -> Result<bool> {
        let mut session = self.session.write().await;

        if session.authenticated {
            return Ok(true);
        }

        let Some((username, password)) = self.config.auth.credentials() else {
            tracing::debug!("No credentials configured, staying anonymous");
            return Ok(false);
        };

        let home = self.fetcher.get(self.endpoint("/")?.as_str(), &[]).await?;
        if !home.is_success() {
            tracing::warn!("Home page returned {}", home.status.as_u16());
            return Ok(false);
        }

        let Some(token) = login_token(&home.body) else {
            tracing::warn!("Login token not found on home page");
            return Ok(false);
        };

        let form = [
            ("username", username.to_string()),
            ("password", password.to_string()),
            ("_token", token.clone()),
        ];
        let response = self
            .fetcher
            .post(self.endpoint("/auth/login")?.as_str(), &form)
            .await?;

        if !response.is_success() {
            tracing::warn!("Login returned {}", response.status.as_u16());
            return Ok(false);
        }

        session.token = token;
        session.authenticated = true;
        tracing::info!("Logged in as {}", username);

        Ok(true)
    }

    /// Ends the session
    ///
    /// Returns true when the client is signed out afterwards: either it never
    /// was signed in, or the logout request succeeded.
    pub async fn logout(&self) -> Result<bool> {
        let mut session = self.session.write().await;

        if !session.authenticated {
            return Ok(true);
        }

        let response = self
            .fetcher
            .get(self.endpoint("/auth/logout")?.as_str(), &[])
            .await?;

        if !response.is_success() {
            tracing::warn!("Logout returned {}", response.status.as_u16());
            return Ok(false);
        }

        session.authenticated = false;
        session.token.clear();
        tracing::info!("Logged out");

        Ok(true)
    }
}
