//! Detail page extraction
//!
//! [`EntityPage`] wraps one parsed detail page. Each field has its own
//! extractor and its own policy for missing markup; none of them fails the
//! others.

use super::selectors::{self, Rule, ScalarField};
use super::{element_text, parse_count, select_all, select_first};
use crate::model::{Avatar, EntityRecord, Field, FieldSelection, Purity, Tag, Uploader};
use scraper::Html;

/// A parsed wallpaper detail page
///
/// `viewer_authenticated` records whether the page was fetched by a signed-in
/// session. Signed-in viewers get extra markup (tag edit controls, purity
/// checkboxes) that changes how tags and purity are read.
pub struct EntityPage {
    document: Html,
    viewer_authenticated: bool,
}

impl EntityPage {
    /// Parses a detail page
    ///
    /// # Example
    ///
    /// ```
    /// use wallhaven_client::extract::EntityPage;
    ///
    /// let html = r#"<section id="showcase"><img id="wallpaper" src="//w.wallhaven.cc/full/x.jpg"></section>"#;
    /// let page = EntityPage::parse(html, false);
    /// assert!(page.has_showcase());
    /// assert_eq!(page.asset_url().as_deref(), Some("https://w.wallhaven.cc/full/x.jpg"));
    /// ```
    pub fn parse(html: &str, viewer_authenticated: bool) -> Self {
        Self {
            document: Html::parse_document(html),
            viewer_authenticated,
        }
    }

    /// True when the page shows a wallpaper
    ///
    /// Deleted or unknown ids render a page without the showcase section.
    pub fn has_showcase(&self) -> bool {
        select_first(&self.document, selectors::SHOWCASE).is_some()
    }

    /// Builds a record from the requested fields
    ///
    /// The short URL does not come from the page, so it is passed in.
    pub fn record(&self, id: &str, short_url: &str, selection: &FieldSelection) -> EntityRecord {
        EntityRecord {
            id: id.to_string(),
            uploader: Field::when(selection.uploader, || Some(self.uploader())),
            category: Field::when(selection.category, || self.category()),
            short_url: Field::when(selection.short_url, || Some(short_url.to_string())),
            upload_time: Field::when(selection.upload_time, || self.upload_time()),
            ratio: Field::when(selection.ratio, || self.ratio()),
            resolution: Field::when(selection.resolution, || self.resolution()),
            colors: Field::when(selection.colors, || Some(self.colors())),
            favorites: Field::when(selection.favorites, || self.favorites()),
            asset_url: Field::when(selection.asset_url, || self.asset_url()),
            file_size: Field::when(selection.file_size, || self.file_size()),
            purity: Field::when(selection.purity, || self.purity()),
            views: Field::when(selection.views, || self.views()),
            tags: Field::when(selection.tags, || Some(self.tags())),
            tags_extended: Field::when(selection.tags_extended, || Some(self.tags_extended())),
        }
    }

    /// Reads a single-element field through the selector table
    pub fn scalar(&self, field: ScalarField) -> Option<String> {
        let field_rule = field.rule();
        let element = select_first(&self.document, field_rule.css)?;

        match field_rule.rule {
            Rule::Text => Some(element_text(element)),
            Rule::TextWithoutSpaces => Some(element_text(element).replace(' ', "")),
            Rule::Attr(name) => element.value().attr(name).map(str::to_string),
            Rule::AbsoluteUrlAttr(name) => element.value().attr(name).map(absolute_url),
        }
    }

    /// Username and avatar of the uploader
    ///
    /// Each half is independently optional.
    pub fn uploader(&self) -> Uploader {
        let username =
            select_first(&self.document, selectors::UPLOADER_USERNAME).map(element_text);

        let avatar = select_first(&self.document, selectors::UPLOADER_AVATAR)
            .and_then(|img| img.value().attr("src"))
            .map(avatar_urls);

        Uploader { username, avatar }
    }

    pub fn category(&self) -> Option<String> {
        self.scalar(ScalarField::Category)
    }

    /// Upload time as found in the `datetime` attribute
    pub fn upload_time(&self) -> Option<String> {
        self.scalar(ScalarField::UploadTime)
    }

    pub fn ratio(&self) -> Option<String> {
        self.scalar(ScalarField::Ratio)
    }

    /// Resolution label, e.g. `1920x1080`
    pub fn resolution(&self) -> Option<String> {
        self.scalar(ScalarField::Resolution)
    }

    /// Dominant colors as `#rrggbb` codes, in swatch order
    pub fn colors(&self) -> Vec<String> {
        select_all(&self.document, selectors::COLOR_SWATCHES)
            .into_iter()
            .filter_map(|swatch| swatch.value().attr("style"))
            .filter_map(|style| style.rfind('#').map(|start| style[start..].trim().to_string()))
            .collect()
    }

    pub fn favorites(&self) -> Option<u64> {
        self.scalar(ScalarField::Favorites)
            .as_deref()
            .and_then(parse_count)
    }

    /// Absolute URL of the full-size image
    pub fn asset_url(&self) -> Option<String> {
        self.scalar(ScalarField::AssetUrl)
    }

    /// File size label, e.g. `1.2 MiB`
    pub fn file_size(&self) -> Option<String> {
        self.scalar(ScalarField::FileSize)
    }

    pub fn views(&self) -> Option<u64> {
        self.scalar(ScalarField::Views).as_deref().and_then(parse_count)
    }

    /// Current purity of the wallpaper
    ///
    /// Labels are scanned SFW, Sketchy, NSFW. An anonymous viewer only ever
    /// sees the label of the actual purity, so the first label found wins.
    /// A signed-in viewer sees every option; there the label only counts when
    /// its checkbox is checked, or when the checkbox is not rendered at all.
    pub fn purity(&self) -> Option<Purity> {
        Purity::ALL.into_iter().find(|&purity| {
            select_first(&self.document, &selectors::purity_label(purity)).is_some()
                && self.purity_selected(purity)
        })
    }

    fn purity_selected(&self, purity: Purity) -> bool {
        if !self.viewer_authenticated {
            return true;
        }

        // TODO: confirm against the live site whether a missing checkbox
        // should make the purity unknown instead of trusting the label
        match select_first(&self.document, &selectors::purity_checkbox(purity)) {
            Some(checkbox) => checkbox.value().attr("checked").is_some(),
            None => true,
        }
    }

    /// Plain tag names in page order
    pub fn tags(&self) -> Vec<String> {
        let css = if self.viewer_authenticated {
            selectors::TAG_NAMES_AUTHENTICATED
        } else {
            selectors::TAG_NAMES_ANONYMOUS
        };

        select_all(&self.document, css)
            .into_iter()
            .map(element_text)
            .collect()
    }

    /// Tags with their ids and type
    ///
    /// Tag elements missing a name or an id are skipped.
    pub fn tags_extended(&self) -> Vec<Tag> {
        let Ok(name_selector) = scraper::Selector::parse(selectors::TAG_ITEM_NAME) else {
            return Vec::new();
        };

        select_all(&self.document, selectors::TAG_ITEMS)
            .into_iter()
            .filter_map(|item| {
                let name = item.select(&name_selector).next().map(element_text)?;
                let id = item.value().attr(selectors::TAG_ITEM_ID_ATTR)?.to_string();
                let type_label = item
                    .value()
                    .classes()
                    .find_map(|class| class.strip_prefix(selectors::TAG_TYPE_CLASS_PREFIX))
                    .map(str::to_string);

                Some(Tag {
                    name,
                    id,
                    type_label,
                })
            })
            .collect()
    }
}

/// Turns a protocol-relative URL into an https one
fn absolute_url(src: &str) -> String {
    match src.strip_prefix("//") {
        Some(rest) => format!("https://{}", rest),
        None => src.to_string(),
    }
}

/// Builds both avatar sizes from the small avatar's `src`
///
/// A leading `//` is dropped rather than replaced with a scheme.
fn avatar_urls(src: &str) -> Avatar {
    let small = src.strip_prefix("//").unwrap_or(src).to_string();
    let large = small.replace(
        selectors::AVATAR_SMALL_SEGMENT,
        selectors::AVATAR_LARGE_SEGMENT,
    );

    Avatar { small, large }
}
