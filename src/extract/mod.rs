//! HTML extraction for Wallhaven pages
//!
//! Everything here works on already-fetched markup and never touches the
//! network, so documents can be parsed once and queried many times:
//! - Anti-forgery token of the login form
//! - Listing pages: page count and wallpaper ids
//! - Detail pages: every [`crate::model::EntityRecord`] field

mod entity;
mod listing;
pub mod selectors;

pub use entity::EntityPage;
pub use listing::{entity_ids, pages_count, ListingPage};

use scraper::{ElementRef, Html, Selector};

/// Extracts the login form's anti-forgery token from the home page
///
/// # Example
///
/// ```
/// use wallhaven_client::extract::login_token;
///
/// let html = r#"<form id="login"><input type="hidden" name="_token" value="abc123"></form>"#;
/// assert_eq!(login_token(html), Some("abc123".to_string()));
/// ```
pub fn login_token(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    select_first(&document, selectors::LOGIN_TOKEN)?
        .value()
        .attr("value")
        .map(str::to_string)
}

/// Returns the first element matching `css`
pub(crate) fn select_first<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    document.select(&selector).next()
}

/// Returns every element matching `css`, in document order
pub(crate) fn select_all<'a>(document: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => document.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// Trimmed text content of an element
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Parses a count like `12,345`, ignoring thousands separators
pub(crate) fn parse_count(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(|c| *c != ',').collect();
    digits.trim().parse().ok()
}
