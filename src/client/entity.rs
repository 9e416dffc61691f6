//! Detail page requests
//!
//! Each per-field accessor fetches and parses the page once and runs the
//! matching [`EntityPage`] extractor. [`WallhavenClient::get_record`] does the
//! same for many fields at once.

use super::{FetchedPage, WallhavenClient};
use crate::extract::EntityPage;
use crate::model::{EntityRecord, FieldSelection, Purity, Tag, Uploader};
use crate::Result;

/// Parses a detail page response, None unless it shows a wallpaper
fn parse_entity_page(response: &FetchedPage, viewer_authenticated: bool) -> Option<EntityPage> {
    if !response.is_success() {
        return None;
    }

    let page = EntityPage::parse(&response.body, viewer_authenticated);
    page.has_showcase().then_some(page)
}

impl WallhavenClient {
    async fn fetch_wallpaper(&self, id: &str) -> Result<FetchedPage> {
        let url = self.wallpaper_url(id)?;
        self.fetcher.get(url.as_str(), &[]).await
    }

    /// Checks whether a wallpaper exists
    pub async fn exists(&self, id: &str) -> Result<bool> {
        let response = self.fetch_wallpaper(id).await?;

        Ok(response.is_success()
            && EntityPage::parse(&response.body, false).has_showcase())
    }

    /// Extracts the selected fields of a wallpaper from one fetch
    ///
    /// When the page cannot be fetched or shows no wallpaper, every requested
    /// field is `Missing`.
    pub async fn get_record(&self, id: &str, selection: &FieldSelection) -> Result<EntityRecord> {
        let authenticated = self.is_authenticated().await;
        let response = self.fetch_wallpaper(id).await?;
        let short_url = self.image_short_url(id);

        let record = match parse_entity_page(&response, authenticated) {
            Some(page) => page.record(id, &short_url, selection),
            None => {
                tracing::debug!("Wallpaper {} unavailable ({})", id, response.status.as_u16());
                EntityRecord::unavailable(id, selection)
            }
        };

        Ok(record)
    }

    /// Fetches the page once and runs a single extractor on it
    async fn extract_field<T, F>(&self, id: &str, extract: F) -> Result<T>
    where
        T: Default,
        F: FnOnce(&EntityPage) -> T,
    {
        let authenticated = self.is_authenticated().await;
        let response = self.fetch_wallpaper(id).await?;

        Ok(parse_entity_page(&response, authenticated)
            .map(|page| extract(&page))
            .unwrap_or_default())
    }

    pub async fn image_uploader(&self, id: &str) -> Result<Uploader> {
        self.extract_field(id, EntityPage::uploader).await
    }

    pub async fn image_category(&self, id: &str) -> Result<Option<String>> {
        self.extract_field(id, EntityPage::category).await
    }

    pub async fn image_upload_time(&self, id: &str) -> Result<Option<String>> {
        self.extract_field(id, EntityPage::upload_time).await
    }

    pub async fn image_ratio(&self, id: &str) -> Result<Option<String>> {
        self.extract_field(id, EntityPage::ratio).await
    }

    pub async fn image_resolution(&self, id: &str) -> Result<Option<String>> {
        self.extract_field(id, EntityPage::resolution).await
    }

    pub async fn image_colors(&self, id: &str) -> Result<Vec<String>> {
        self.extract_field(id, EntityPage::colors).await
    }

    pub async fn image_favorites(&self, id: &str) -> Result<Option<u64>> {
        self.extract_field(id, EntityPage::favorites).await
    }

    /// URL of the full-size image as linked from the detail page
    pub async fn image_url(&self, id: &str) -> Result<Option<String>> {
        self.extract_field(id, EntityPage::asset_url).await
    }

    pub async fn image_size(&self, id: &str) -> Result<Option<String>> {
        self.extract_field(id, EntityPage::file_size).await
    }

    /// Purity as seen by this session
    pub async fn image_purity(&self, id: &str) -> Result<Option<Purity>> {
        self.extract_field(id, EntityPage::purity).await
    }

    pub async fn image_views(&self, id: &str) -> Result<Option<u64>> {
        self.extract_field(id, EntityPage::views).await
    }

    pub async fn image_tags(&self, id: &str) -> Result<Vec<String>> {
        self.extract_field(id, EntityPage::tags).await
    }

    pub async fn image_tags_extended(&self, id: &str) -> Result<Vec<Tag>> {
        self.extract_field(id, EntityPage::tags_extended).await
    }
}
