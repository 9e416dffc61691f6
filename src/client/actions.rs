//! Tag and purity changes for signed-in sessions
//!
//! The site answers these with a JSON body carrying a boolean `status`. A
//! non-success status code, a body that is not JSON, or a missing `status`
//! all count as a rejected action.

use super::{FetchedPage, WallhavenClient};
use crate::model::Purity;
use crate::Result;
use reqwest::Method;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ActionResponse {
    status: bool,
}

/// Interprets an action response
fn action_succeeded(response: &FetchedPage) -> bool {
    if !response.is_success() {
        tracing::debug!("Action returned {}", response.status.as_u16());
        return false;
    }

    match serde_json::from_str::<ActionResponse>(&response.body) {
        Ok(action) => action.status,
        Err(e) => {
            tracing::warn!("Unreadable action response from {}: {}", response.url, e);
            false
        }
    }
}

impl WallhavenClient {
    /// Removes a tag from a wallpaper
    ///
    /// Returns false without sending anything when not signed in.
    pub async fn delete_tag(&self, id: &str, tag_id: &str) -> Result<bool> {
        let Some(token) = self.session_token().await else {
            return Ok(false);
        };

        let url = self.endpoint(&format!("/wallpaper/tag/remove/{}/{}", tag_id, id))?;
        let request = self
            .fetcher
            .request(Method::POST, url.as_str())
            .query(&[("_token", token)]);
        let response = self.fetcher.execute(request).await?;

        Ok(action_succeeded(&response))
    }

    /// Adds a tag to a wallpaper
    ///
    /// Returns false without sending anything when not signed in.
    pub async fn add_tag(&self, id: &str, tag_name: &str) -> Result<bool> {
        let Some(token) = self.session_token().await else {
            return Ok(false);
        };

        let form = [
            ("tag_name", tag_name.to_string()),
            ("wallpaper_id", id.to_string()),
            ("wallpaper_group", id.to_string()),
            ("_token", token),
        ];
        let url = self.endpoint("/wallpaper/tag/add")?;
        let response = self.fetcher.post(url.as_str(), &form).await?;

        Ok(action_succeeded(&response))
    }

    /// Changes the purity of a wallpaper
    ///
    /// `purity` must be exactly `sfw`, `sketchy` or `nsfw`. Returns false
    /// without sending anything for any other value or when not signed in.
    pub async fn change_purity(&self, id: &str, purity: &str) -> Result<bool> {
        let Some(purity) = Purity::from_param(purity) else {
            tracing::debug!("Rejected purity literal {:?}", purity);
            return Ok(false);
        };

        let Some(token) = self.session_token().await else {
            return Ok(false);
        };

        let form = [
            ("wallpaper_id", id.to_string()),
            ("purity", purity.as_param().to_string()),
            ("_token", token),
        ];
        let url = self.endpoint("/wallpaper/purity")?;
        let response = self.fetcher.post(url.as_str(), &form).await?;

        Ok(action_succeeded(&response))
    }
}
