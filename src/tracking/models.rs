use serde::Deserialize;
use std::fmt;

/// A single artist or playlist from the tracking file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Entry {
    pub name: String,
    pub url: String,
    #[serde(default = "default_refresh")]
    pub refresh: bool,
}

fn default_refresh() -> bool {
    true
}

impl Entry {
    pub fn new(name: &str, url: &str, refresh: bool) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            refresh,
        }
    }
}

/// The kinds of entries a tracking file can list, in processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Artists,
    Playlists,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Artists, Category::Playlists];

    /// The top-level key of this category in the tracking file.
    pub fn key(self) -> &'static str {
        match self {
            Category::Artists => "artists",
            Category::Playlists => "playlists",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Contents of the tracking file. Read once, never modified.
///
/// A category that is missing from the file, or present but `null`, has no entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TrackingConfig {
    #[serde(default)]
    artists: Option<Vec<Entry>>,
    #[serde(default)]
    playlists: Option<Vec<Entry>>,
}

impl TrackingConfig {
    pub fn new(artists: Vec<Entry>, playlists: Vec<Entry>) -> Self {
        Self {
            artists: Some(artists),
            playlists: Some(playlists),
        }
    }

    /// Returns the entries of `category` in file order.
    pub fn entries(&self, category: Category) -> &[Entry] {
        let entries = match category {
            Category::Artists => &self.artists,
            Category::Playlists => &self.playlists,
        };
        entries.as_deref().unwrap_or_default()
    }

    /// Number of entries across all categories.
    pub fn total(&self) -> usize {
        Category::ALL.iter().map(|c| self.entries(*c).len()).sum()
    }
}
