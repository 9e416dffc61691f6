//! Data exchanged with callers
//!
//! # Components
//!
//! - `Purity`: content-sensitivity level of a wallpaper
//! - `SearchFilters`: listing request filters
//! - `EntityRecord`: fields extracted from a detail page, each wrapped in a `Field`

mod purity;
mod query;
mod record;

// Re-export main types
pub use purity::Purity;
pub use query::{Categories, PurityFilter, SearchFilters};
pub use record::{Avatar, EntityRecord, Field, FieldSelection, Tag, Uploader};
