use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown question category: {raw}")]
pub struct CategoryParseError {
    raw: String,
}

impl CategoryParseError {
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

//
// ─── CATEGORY ─────────────────────────────────────────────────────────────────
//

/// The four bookkeeping question categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Journal entry questions.
    Journal,
    /// Calculation questions.
    Calculation,
    /// Financial statement questions.
    Financial,
    /// Terminology questions.
    Term,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Journal,
        Category::Calculation,
        Category::Financial,
        Category::Term,
    ];

    /// Storage and wire tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Journal => "journal",
            Category::Calculation => "calculation",
            Category::Financial => "financial",
            Category::Term => "term",
        }
    }

    /// Display name shown to learners.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Journal => "仕訳問題",
            Category::Calculation => "計算問題",
            Category::Financial => "財務諸表",
            Category::Term => "用語問題",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CategoryParseError { raw: s.to_string() })
    }
}

/// Maps a raw category tag to its display name.
///
/// Accepts the four category tags and the `all` filter tag. Unknown tags are
/// returned unchanged.
#[must_use]
pub fn category_label(tag: &str) -> &str {
    match tag.parse::<CategoryFilter>() {
        Ok(filter) => filter.label(),
        Err(_) => tag,
    }
}

//
// ─── FILTER ───────────────────────────────────────────────────────────────────
//

/// Selects which questions are drawn into a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub const ALL_TAG: &'static str = "all";

    #[must_use]
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryFilter::All => Self::ALL_TAG,
            CategoryFilter::Only(category) => category.as_str(),
        }
    }

    /// Display name used in history listings.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::All => "全範囲",
            CategoryFilter::Only(category) => category.label(),
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryFilter {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::ALL_TAG {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = CategoryParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_known_categories() {
        assert_eq!(category_label("journal"), "仕訳問題");
        assert_eq!(category_label("calculation"), "計算問題");
        assert_eq!(category_label("financial"), "財務諸表");
        assert_eq!(category_label("term"), "用語問題");
        assert_eq!(category_label("all"), "全範囲");
    }

    #[test]
    fn unknown_tag_passes_through() {
        assert_eq!(category_label("tax"), "tax");
        assert_eq!(category_label(""), "");
    }

    #[test]
    fn filter_parses_all_and_single_categories() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "term".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Term)
        );
        let err = "Journal".parse::<CategoryFilter>().unwrap_err();
        assert_eq!(err.raw(), "Journal");
    }

    #[test]
    fn filter_matches() {
        assert!(CategoryFilter::All.matches(Category::Financial));
        assert!(CategoryFilter::Only(Category::Journal).matches(Category::Journal));
        assert!(!CategoryFilter::Only(Category::Journal).matches(Category::Term));
    }

    #[test]
    fn filter_serializes_as_plain_tag() {
        let json = serde_json::to_string(&CategoryFilter::Only(Category::Financial)).unwrap();
        assert_eq!(json, "\"financial\"");
        let back: CategoryFilter = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(back, CategoryFilter::All);
    }

    #[test]
    fn all_filter_has_its_own_label() {
        assert_eq!(CategoryFilter::All.label(), "全範囲");
        assert_eq!(CategoryFilter::Only(Category::Journal).label(), "仕訳問題");
    }
}
