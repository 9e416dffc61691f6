//! Selector table for the site layout
//!
//! All coupling to Wallhaven's markup lives here. Simple one-element fields
//! are described declaratively by [`ScalarField::rule`]; compound fields
//! (uploader, colors, tags, purity) get their selectors as constants and are
//! assembled in [`super::entity`].

use crate::model::Purity;

/// Present on every detail page of an existing wallpaper
pub const SHOWCASE: &str = "#showcase";

/// Hidden anti-forgery input of the login form on the home page
pub const LOGIN_TOKEN: &str = "#login > input[name=\"_token\"]";

/// First results section of a listing page
pub const LISTING_SECTION: &str = "#thumbs > section:nth-of-type(1)";

/// Results-count heading, ending with `<page> / <total>`
pub const LISTING_HEADING: &str = "#thumbs > section:nth-of-type(1) > h2";

/// Result tiles carrying the wallpaper id
pub const LISTING_TILES: &str =
    "#thumbs > section:nth-of-type(1) > ul > li > figure[data-wallpaper-id]";

/// Attribute of a result tile holding the wallpaper id
pub const LISTING_TILE_ID_ATTR: &str = "data-wallpaper-id";

pub const UPLOADER_AVATAR: &str = "a.avatar.avatar-32 > img";
pub const UPLOADER_USERNAME: &str = "a.username.usergroup-2";

/// Path segment of the small avatar and its large replacement
pub const AVATAR_SMALL_SEGMENT: &str = "/32/";
pub const AVATAR_LARGE_SEGMENT: &str = "/200/";

/// Color swatches; the hex code ends the `style` attribute
pub const COLOR_SWATCHES: &str = "#showcase-sidebar > div > div.sidebar-content > ul > li";

/// Tag name links for anonymous viewers
pub const TAG_NAMES_ANONYMOUS: &str = "#tags > li > a:nth-of-type(1)";

/// Tag name links for signed-in viewers; each tag starts with an edit control
pub const TAG_NAMES_AUTHENTICATED: &str = "#tags > li > a:nth-of-type(2)";

pub const TAG_ITEMS: &str = "#tags > .tag";
pub const TAG_ITEM_NAME: &str = ".tagname";
pub const TAG_ITEM_ID_ATTR: &str = "data-tag-id";
pub const TAG_TYPE_CLASS_PREFIX: &str = "tag-";

/// Label offered for a purity level in the purity form
pub fn purity_label(purity: Purity) -> String {
    format!("#wallpaper-purity-form label.purity.{}", purity.as_param())
}

/// Checkbox backing a purity label, only rendered for signed-in viewers
pub fn purity_checkbox(purity: Purity) -> String {
    format!("#{}", purity.as_param())
}

/// Fields that are read from a single element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarField {
    Category,
    UploadTime,
    Ratio,
    Resolution,
    Favorites,
    AssetUrl,
    FileSize,
    Views,
}

/// How the value is read off the matched element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Trimmed text content
    Text,
    /// Text content with every space removed
    TextWithoutSpaces,
    /// Value of an attribute
    Attr(&'static str),
    /// Attribute holding a possibly protocol-relative URL, made absolute
    AbsoluteUrlAttr(&'static str),
}

/// Selector plus extraction rule for one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub css: &'static str,
    pub rule: Rule,
}

impl ScalarField {
    pub const ALL: [ScalarField; 8] = [
        Self::Category,
        Self::UploadTime,
        Self::Ratio,
        Self::Resolution,
        Self::Favorites,
        Self::AssetUrl,
        Self::FileSize,
        Self::Views,
    ];

    pub fn rule(self) -> FieldRule {
        let (css, rule) = match self {
            Self::Category => (
                "div[data-storage-id=\"showcase-info\"] > dl > dd:nth-of-type(2)",
                Rule::Text,
            ),
            Self::UploadTime => ("dd.showcase-uploader > time", Rule::Attr("datetime")),
            Self::Ratio => (
                "#showcase-sidebar > div > div.sidebar-content > h3",
                Rule::Attr("title"),
            ),
            Self::Resolution => (
                "#showcase-sidebar > div > div.sidebar-content > h3",
                Rule::TextWithoutSpaces,
            ),
            Self::Favorites => (
                "div[data-storage-id=\"showcase-info\"] > dl > dd:nth-of-type(5) > a",
                Rule::Text,
            ),
            Self::AssetUrl => ("#wallpaper", Rule::AbsoluteUrlAttr("src")),
            Self::FileSize => (
                "div[data-storage-id=\"showcase-info\"] > dl > dd:nth-of-type(3)",
                Rule::Text,
            ),
            Self::Views => (
                "div[data-storage-id=\"showcase-info\"] > dl > dd:nth-of-type(4)",
                Rule::Text,
            ),
        };
        FieldRule { css, rule }
    }
}
