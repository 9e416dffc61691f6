//! Search/listing requests

use super::WallhavenClient;
use crate::extract::{self, ListingPage};
use crate::model::SearchFilters;
use crate::Result;
use scraper::Html;

impl WallhavenClient {
    /// Fetches a listing page, returning its body on success
    async fn fetch_listing(&self, filters: &SearchFilters, page: u32) -> Result<Option<String>> {
        let url = self.endpoint("/search")?;
        let response = self.fetcher.get(url.as_str(), &filters.to_params(page)).await?;

        if !response.is_success() {
            tracing::debug!("Listing page {} returned {}", page, response.status.as_u16());
            return Ok(None);
        }

        Ok(Some(response.body))
    }

    /// Number of result pages for the filters
    ///
    /// None when the request fails or the results heading is missing.
    pub async fn get_pages_count(&self, filters: &SearchFilters, page: u32) -> Result<Option<u32>> {
        let Some(body) = self.fetch_listing(filters, page).await? else {
            return Ok(None);
        };

        Ok(extract::pages_count(&Html::parse_document(&body)))
    }

    /// Wallpaper ids on one result page, in page order
    ///
    /// None when the request fails or the results section is missing;
    /// `Some(vec![])` when the section is there but empty.
    pub async fn get_images_numbers(
        &self,
        filters: &SearchFilters,
        page: u32,
    ) -> Result<Option<Vec<String>>> {
        let Some(body) = self.fetch_listing(filters, page).await? else {
            return Ok(None);
        };

        Ok(extract::entity_ids(&Html::parse_document(&body)))
    }

    /// Page count and ids from a single request
    pub async fn search(&self, filters: &SearchFilters, page: u32) -> Result<Option<ListingPage>> {
        Ok(self
            .fetch_listing(filters, page)
            .await?
            .map(|body| ListingPage::parse(&body)))
    }
}
