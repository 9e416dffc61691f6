//! HTTP fetcher implementation
//!
//! Every request of a [`super::WallhavenClient`] goes through one
//! [`DocumentFetcher`]. It owns the reqwest client (and with it the cookie jar
//! holding the login session) and a lock that allows a single request in
//! flight at a time. The lock covers sending the request and receiving the
//! response; parsing happens afterwards on the caller's copy of the body.

use crate::config::HttpConfig;
use crate::{Result, WallhavenError};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tokio::sync::Mutex;

/// A fully received response
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub url: String,
    /// HTTP status code
    pub status: StatusCode,
    /// Response body
    pub body: String,
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Builds an HTTP client with proper configuration
///
/// The client keeps cookies between requests so a login carries over to
/// every later call. Redirects are followed, since the login form answers
/// with one.
///
/// # Arguments
///
/// * `config` - The transport configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use wallhaven_client::client::build_http_client;
/// use wallhaven_client::config::HttpConfig;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .cookie_store(true)
        .danger_accept_invalid_certs(!config.verify_certificates)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Serializes all requests of one client through a single lock
#[derive(Debug)]
pub struct DocumentFetcher {
    client: Client,
    lock: Mutex<()>,
}

impl DocumentFetcher {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            lock: Mutex::new(()),
        }
    }

    /// Starts a request on the shared client
    ///
    /// Extra options (headers, query, body) are added to the returned builder
    /// before handing it to [`Self::execute`].
    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client.request(method, url)
    }

    /// Sends a request and reads the whole body while holding the lock
    ///
    /// Non-success status codes are returned as-is; only transport failures
    /// become errors.
    pub async fn execute(&self, request: RequestBuilder) -> Result<FetchedPage> {
        let request = request.build()?;
        let method = request.method().clone();
        let url = request.url().to_string();

        let (status, final_url, body) = {
            let _guard = self.lock.lock().await;

            let response = self
                .client
                .execute(request)
                .await
                .map_err(|source| WallhavenError::Http {
                    url: url.clone(),
                    source,
                })?;

            let status = response.status();
            let final_url = response.url().to_string();
            let body = response
                .text()
                .await
                .map_err(|source| WallhavenError::Http {
                    url: url.clone(),
                    source,
                })?;

            (status, final_url, body)
        };

        tracing::debug!("{} {} -> {}", method, url, status.as_u16());

        Ok(FetchedPage {
            url: final_url,
            status,
            body,
        })
    }

    /// GET with query parameters
    pub async fn get(&self, url: &str, params: &[(&str, String)]) -> Result<FetchedPage> {
        self.execute(self.request(Method::GET, url).query(params))
            .await
    }

    /// POST with a form-encoded body
    pub async fn post(&self, url: &str, form: &[(&str, String)]) -> Result<FetchedPage> {
        self.execute(self.request(Method::POST, url).form(form))
            .await
    }

    /// GET whose body is streamed by the caller
    ///
    /// The lock is released once the response head has arrived.
    pub async fn open_stream(&self, url: &str) -> Result<Response> {
        let response = {
            let _guard = self.lock.lock().await;

            self.client
                .get(url)
                .send()
                .await
                .map_err(|source| WallhavenError::Http {
                    url: url.to_string(),
                    source,
                })?
        };

        tracing::debug!("GET {} -> {} (streaming)", url, response.status().as_u16());

        Ok(response)
    }
}
