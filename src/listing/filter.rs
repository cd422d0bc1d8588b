//! Category and free-text filtering of the post catalog

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::content::PostRecord;

/// Category selection; `All` disables category filtering
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Parse a filter button / query parameter value; `all` and empty mean `All`
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "all" => CategoryFilter::All,
            category => CategoryFilter::Only(category.to_string()),
        }
    }

    /// Button value for this filter
    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }

    /// Exact, case-sensitive match
    pub fn matches(&self, post: &PostRecord) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => post.category == *category,
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        CategoryFilter::parse(&value)
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.as_str().to_string()
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trim and lowercase a search query
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Filter `posts` by category, then by text query
///
/// Stable: the result keeps catalog order. An empty (after trimming) query
/// matches everything.
pub fn apply<'a>(
    posts: &'a [PostRecord],
    category: &CategoryFilter,
    query: &str,
) -> Vec<&'a PostRecord> {
    let query = normalize_query(query);

    posts
        .iter()
        .filter(|post| category.matches(post))
        .filter(|post| query.is_empty() || post.searchable_text().contains(&query))
        .collect()
}
