//! Listing (search results) extraction

use super::{element_text, select_all, select_first, selectors};
use scraper::Html;

/// What a single listing page yields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    /// Total number of result pages; None when the heading is missing
    pub total_pages: Option<u32>,

    /// Wallpaper ids in document order
    ///
    /// None when the results section is missing altogether, which is not the
    /// same as a section with zero tiles.
    pub entity_ids: Option<Vec<String>>,
}

impl ListingPage {
    /// Parses a listing page
    ///
    /// # Example
    ///
    /// ```
    /// use wallhaven_client::extract::ListingPage;
    ///
    /// let html = r#"<div id="thumbs"><section><h2>24 Wallpapers found 1 / 3</h2>
    ///     <ul><li><figure data-wallpaper-id="abc"></figure></li></ul></section></div>"#;
    /// let page = ListingPage::parse(html);
    /// assert_eq!(page.total_pages, Some(3));
    /// assert_eq!(page.entity_ids, Some(vec!["abc".to_string()]));
    /// ```
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);

        Self {
            total_pages: pages_count(&document),
            entity_ids: entity_ids(&document),
        }
    }
}

/// Reads the page count after the last `/` of the results heading
pub fn pages_count(document: &Html) -> Option<u32> {
    let heading = element_text(select_first(document, selectors::LISTING_HEADING)?);
    let (_, total) = heading.rsplit_once('/')?;
    let total: String = total.chars().filter(|c| *c != ',').collect();

    total.trim().parse().ok()
}

/// Collects the wallpaper ids of every result tile
pub fn entity_ids(document: &Html) -> Option<Vec<String>> {
    select_first(document, selectors::LISTING_SECTION)?;

    let ids: Vec<String> = select_all(document, selectors::LISTING_TILES)
        .into_iter()
        .filter_map(|tile| tile.value().attr(selectors::LISTING_TILE_ID_ATTR))
        .map(str::to_string)
        .collect();

    tracing::debug!("Found {} wallpaper tiles", ids.len());

    Some(ids)
}
