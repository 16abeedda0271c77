use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod config_file;
pub mod date;
pub mod html;
pub mod loader;
pub mod query;
pub mod render;
pub mod session;
pub mod vocabulary;

// Re-export for convenience
pub use loader::{DataSource, LoadError, load, parse_papers};
pub use query::query;
pub use render::{KeywordChip, PaperCard, Tag, TagKind, View, ViewStatus, sync};
pub use session::{Session, SessionPhase};
pub use vocabulary::{derive_vocabulary, locale_cmp};

/// Default location of the dataset when nothing else is configured.
pub const DEFAULT_SOURCE: &str = "./data/papers.json";

/// A single paper record, normalized at load time.
///
/// Optional collections are always present (empty when the source record
/// omitted them), so nothing downstream needs to check for absence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Paper {
    pub title: String,
    pub summary: String,
    pub link: String,
    /// `published` exactly as it appeared in the dataset.
    pub published: String,
    /// Parsed publication instant; `None` when `published` is unparsable.
    pub published_at: Option<DateTime<Utc>>,
    pub authors: Vec<String>,
    pub categories: Vec<String>,
    pub source: Option<String>,
    pub matched_keywords: Vec<String>,
    pub id: Option<String>,
    pub doi: Option<String>,
    pub primary_category: Option<String>,
    pub updated: Option<String>,
}

impl Paper {
    /// Whether every keyword in `selected` is among this paper's matched keywords.
    pub fn has_all_keywords(&self, selected: &BTreeSet<String>) -> bool {
        selected
            .iter()
            .all(|k| self.matched_keywords.iter().any(|m| m == k))
    }
}

/// Sort order for the paper list, by publication date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    pub fn next(self) -> Self {
        match self {
            Self::Newest => Self::Oldest,
            Self::Oldest => Self::Newest,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            other => Err(format!(
                "unknown sort order '{other}' (expected 'newest' or 'oldest')"
            )),
        }
    }
}

/// The user-controlled query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    pub selected_keywords: BTreeSet<String>,
    pub sort: SortOrder,
}

impl FilterState {
    pub fn with_sort(sort: SortOrder) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    /// Add `keyword` if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle_keyword(&mut self, keyword: &str) -> bool {
        if self.selected_keywords.remove(keyword) {
            false
        } else {
            self.selected_keywords.insert(keyword.to_string());
            true
        }
    }

    /// Search text as used for matching: trimmed and lowercased.
    pub fn normalized_search(&self) -> String {
        self.search.trim().to_lowercase()
    }

    pub fn is_unfiltered(&self) -> bool {
        self.normalized_search().is_empty() && self.selected_keywords.is_empty()
    }
}

/// A user interaction that mutates the filter state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    /// The search box now holds this text.
    Search(String),
    ToggleKeyword(String),
    SetSort(SortOrder),
    ClearKeywords,
}

impl FilterEvent {
    /// Apply this event to `state`.
    pub fn apply(self, state: &mut FilterState) {
        match self {
            Self::Search(text) => state.search = text,
            Self::ToggleKeyword(keyword) => {
                state.toggle_keyword(&keyword);
            }
            Self::SetSort(sort) => state.sort = sort,
            Self::ClearKeywords => state.selected_keywords.clear(),
        }
    }
}
