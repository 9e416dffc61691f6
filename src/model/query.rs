//! Search filters for listing pages

/// Which wallpaper categories a search includes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Categories {
    pub general: bool,
    pub anime: bool,
    pub people: bool,
}

impl Default for Categories {
    fn default() -> Self {
        Self {
            general: true,
            anime: true,
            people: true,
        }
    }
}

impl Categories {
    /// The `categories` query value, e.g. `"110"`
    pub fn as_param(&self) -> String {
        flags_param([self.general, self.anime, self.people])
    }
}

/// Which purity levels a search includes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurityFilter {
    pub sfw: bool,
    pub sketchy: bool,
    pub nsfw: bool,
}

impl Default for PurityFilter {
    fn default() -> Self {
        Self {
            sfw: true,
            sketchy: true,
            nsfw: false,
        }
    }
}

impl PurityFilter {
    /// The `purity` query value, e.g. `"110"`
    pub fn as_param(&self) -> String {
        flags_param([self.sfw, self.sketchy, self.nsfw])
    }
}

/// Filters applied to a search/listing request
///
/// Empty strings leave the corresponding filter to the site's default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilters {
    pub categories: Categories,
    pub purity: PurityFilter,
    /// Comma-separated resolutions, e.g. `1920x1080,2560x1440`
    pub resolutions: String,
    /// Comma-separated aspect ratios, e.g. `16x9`
    pub ratios: String,
    /// Sort key, e.g. `date_added`, `views`, `favorites`
    pub sorting: String,
    /// `desc` or `asc`
    pub order: String,
    /// Free-text query
    pub query: Option<String>,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            categories: Categories::default(),
            purity: PurityFilter::default(),
            resolutions: String::new(),
            ratios: String::new(),
            sorting: String::new(),
            order: "desc".to_string(),
            query: None,
        }
    }
}

impl SearchFilters {
    /// Sets the free-text query
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Builds the query string pairs for the given 1-based page
    pub fn to_params(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("categories", self.categories.as_param()),
            ("purity", self.purity.as_param()),
            ("resolutions", self.resolutions.clone()),
            ("ratios", self.ratios.clone()),
            ("sorting", self.sorting.clone()),
            ("order", self.order.clone()),
            ("page", page.to_string()),
        ];

        if let Some(query) = &self.query {
            params.push(("q", query.clone()));
        }

        params
    }
}

/// Packs three flags into the site's `0`/`1` triplet notation
fn flags_param(flags: [bool; 3]) -> String {
    flags.iter().map(|&on| if on { '1' } else { '0' }).collect()
}
