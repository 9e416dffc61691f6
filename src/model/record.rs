//! Wallpaper detail records
//!
//! An [`EntityRecord`] holds every field a detail page can yield. Each field is
//! a [`Field`], which keeps "not asked for" apart from "asked for but not on
//! the page".

use crate::model::Purity;
use chrono::{DateTime, FixedOffset};
use serde::{Serialize, Serializer};

/// A single field of a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    /// The caller did not request this field
    Skipped,

    /// Requested, but the page did not contain it
    Missing,

    /// Requested and extracted
    Found(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self::Skipped
    }
}

impl<T> Field<T> {
    /// Runs the extractor only when the field was requested
    pub fn when(requested: bool, extract: impl FnOnce() -> Option<T>) -> Self {
        if !requested {
            return Self::Skipped;
        }
        match extract() {
            Some(value) => Self::Found(value),
            None => Self::Missing,
        }
    }

    /// `Missing` if requested, `Skipped` otherwise
    pub fn unavailable(requested: bool) -> Self {
        if requested {
            Self::Missing
        } else {
            Self::Skipped
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The extracted value, if any
    pub fn found(&self) -> Option<&T> {
        match self {
            Self::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            _ => None,
        }
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Found(value) => value.serialize(serializer),
            _ => serializer.serialize_none(),
        }
    }
}

/// Which fields [`EntityRecord`] extraction should fill
///
/// Everything is requested by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSelection {
    pub uploader: bool,
    pub category: bool,
    pub short_url: bool,
    pub upload_time: bool,
    pub tags: bool,
    pub ratio: bool,
    pub resolution: bool,
    pub colors: bool,
    pub favorites: bool,
    pub asset_url: bool,
    pub file_size: bool,
    pub purity: bool,
    pub views: bool,
    pub tags_extended: bool,
}

impl Default for FieldSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl FieldSelection {
    pub fn all() -> Self {
        Self::uniform(true)
    }

    pub fn none() -> Self {
        Self::uniform(false)
    }

    fn uniform(on: bool) -> Self {
        Self {
            uploader: on,
            category: on,
            short_url: on,
            upload_time: on,
            tags: on,
            ratio: on,
            resolution: on,
            colors: on,
            favorites: on,
            asset_url: on,
            file_size: on,
            purity: on,
            views: on,
            tags_extended: on,
        }
    }
}

/// Avatar image URLs of an uploader
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Avatar {
    /// 32px variant, as found on the page
    pub small: String,
    /// 200px variant
    pub large: String,
}

/// The account that uploaded a wallpaper
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Uploader {
    pub username: Option<String>,
    pub avatar: Option<Avatar>,
}

/// A tag attached to a wallpaper
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub name: String,
    /// Site-assigned tag id
    pub id: String,
    /// Type taken from the `tag-<type>` class, when present
    #[serde(rename = "type")]
    pub type_label: Option<String>,
}

/// Structured data extracted from a wallpaper detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRecord {
    pub id: String,
    #[serde(skip_serializing_if = "Field::is_skipped")]
    pub uploader: Field<Uploader>,
    #[serde(skip_serializing_if = "Field::is_skipped")]
    pub category: Field<String>,
    #[serde(skip_serializing_if = "Field::is_skipped")]
    pub short_url: Field<String>,
    #[serde(skip_serializing_if = "Field::is_skipped")]
    pub upload_time: Field<String>,
    #[serde(skip_serializing_if = "Field::is_skipped")]
    pub ratio: Field<String>,
    #[serde(skip_serializing_if = "Field::is_skipped")]
    pub resolution: Field<String>,
    #[serde(skip_serializing_if = "Field::is_skipped")]
    pub colors: Field<Vec<String>>,
    #[serde(skip_serializing_if = "Field::is_skipped")]
    pub favorites: Field<u64>,
    #[serde(skip_serializing_if = "Field::is_skipped")]
    pub asset_url: Field<String>,
    #[serde(skip_serializing_if = "Field::is_skipped")]
    pub file_size: Field<String>,
    #[serde(skip_serializing_if = "Field::is_skipped")]
    pub purity: Field<Purity>,
    #[serde(skip_serializing_if = "Field::is_skipped")]
    pub views: Field<u64>,
    #[serde(skip_serializing_if = "Field::is_skipped")]
    pub tags: Field<Vec<String>>,
    #[serde(skip_serializing_if = "Field::is_skipped")]
    pub tags_extended: Field<Vec<Tag>>,
}

impl EntityRecord {
    /// A record with nothing requested
    pub fn empty(id: impl Into<String>) -> Self {
        Self::unavailable(id, &FieldSelection::none())
    }

    /// A record for a page that could not be fetched or has no showcase
    ///
    /// Every requested field is `Missing`.
    pub fn unavailable(id: impl Into<String>, selection: &FieldSelection) -> Self {
        Self {
            id: id.into(),
            uploader: Field::unavailable(selection.uploader),
            category: Field::unavailable(selection.category),
            short_url: Field::unavailable(selection.short_url),
            upload_time: Field::unavailable(selection.upload_time),
            ratio: Field::unavailable(selection.ratio),
            resolution: Field::unavailable(selection.resolution),
            colors: Field::unavailable(selection.colors),
            favorites: Field::unavailable(selection.favorites),
            asset_url: Field::unavailable(selection.asset_url),
            file_size: Field::unavailable(selection.file_size),
            purity: Field::unavailable(selection.purity),
            views: Field::unavailable(selection.views),
            tags: Field::unavailable(selection.tags),
            tags_extended: Field::unavailable(selection.tags_extended),
        }
    }

    /// True when no field holds a value
    pub fn is_empty(&self) -> bool {
        !(self.uploader.is_found()
            || self.category.is_found()
            || self.short_url.is_found()
            || self.upload_time.is_found()
            || self.ratio.is_found()
            || self.resolution.is_found()
            || self.colors.is_found()
            || self.favorites.is_found()
            || self.asset_url.is_found()
            || self.file_size.is_found()
            || self.purity.is_found()
            || self.views.is_found()
            || self.tags.is_found()
            || self.tags_extended.is_found())
    }

    /// Upload time parsed as RFC 3339
    pub fn uploaded_at(&self) -> Option<DateTime<FixedOffset>> {
        let raw = self.upload_time.found()?;
        DateTime::parse_from_rfc3339(raw).ok()
    }
}
