/// Purity classification of a wallpaper
///
/// The site sorts every upload into one of three content-sensitivity levels.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Content-sensitivity level assigned to a wallpaper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Purity {
    /// Safe for work
    #[serde(rename = "SFW")]
    Sfw,

    /// Suggestive, but not explicit
    Sketchy,

    /// Not safe for work
    #[serde(rename = "NSFW")]
    Nsfw,
}

impl Purity {
    /// All levels in the order the site lists them
    pub const ALL: [Purity; 3] = [Purity::Sfw, Purity::Sketchy, Purity::Nsfw];

    /// The literal the site expects in form fields and element ids
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Sfw => "sfw",
            Self::Sketchy => "sketchy",
            Self::Nsfw => "nsfw",
        }
    }

    /// Parses a form literal
    ///
    /// The match is case-sensitive: only `sfw`, `sketchy` and `nsfw` are
    /// accepted. Returns None for anything else.
    pub fn from_param(s: &str) -> Option<Self> {
        match s {
            "sfw" => Some(Self::Sfw),
            "sketchy" => Some(Self::Sketchy),
            "nsfw" => Some(Self::Nsfw),
            _ => None,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sfw => "SFW",
            Self::Sketchy => "Sketchy",
            Self::Nsfw => "NSFW",
        }
    }
}

impl fmt::Display for Purity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
