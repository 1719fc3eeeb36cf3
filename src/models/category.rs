//! Category tags, entry kinds and breakdown modes
//!
//! An entry carries a set of category tags ("Bills", "Travel", ...). The set
//! is kept canonical: trimmed, de-duplicated and ordered, so the same tags
//! picked in a different order always compare equal and render the same
//! joined label.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Separator used when a tag set is rendered as a single label
pub const TAG_SEPARATOR: &str = ", ";

/// A canonical set of category tags
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySet(BTreeSet<String>);

impl CategorySet {
    /// Create an empty tag set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from individual tags, dropping blanks
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for tag in tags {
            set.insert(tag.as_ref());
        }
        set
    }

    /// Parse a comma-joined label such as `"Bills, Travel"`
    pub fn parse_label(label: &str) -> Self {
        Self::from_tags([label])
    }

    /// Add a tag. Text containing commas is split into several tags, since a
    /// comma is the label separator. Returns true if anything new was added.
    pub fn insert(&mut self, tag: &str) -> bool {
        let mut added = false;
        for part in tag.split(',') {
            let part = part.trim();
            if !part.is_empty() {
                added |= self.0.insert(part.to_string());
            }
        }
        added
    }

    /// Check whether a tag is in the set
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag.trim())
    }

    /// Iterate tags in canonical order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of tags
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the set has no tags
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Canonical joined label, e.g. `"Bills, Travel"`
    pub fn label(&self) -> String {
        self.0
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(TAG_SEPARATOR)
    }
}

impl fmt::Display for CategorySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl<S: AsRef<str>> FromIterator<S> for CategorySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_tags(iter)
    }
}

/// Whether an entry is money coming in or going out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    /// Get all kinds
    pub fn all() -> &'static [Self] {
        &[Self::Income, Self::Expense]
    }

    /// Suggested tags offered by the entry form for this kind
    pub fn default_tags(&self) -> &'static [&'static str] {
        match self {
            Self::Income => &["Pay", "Other", "Bonus", "Investment"],
            Self::Expense => &[
                "Bills",
                "Subscriptions",
                "Groceries",
                "Entertainment",
                "Travel",
            ],
        }
    }

    /// Parse a kind from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Some(Self::Income),
            "expense" | "out" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// How a breakdown groups entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownMode {
    /// One group per distinct tag set ("Bills, Travel" is its own group)
    #[default]
    TagSet,
    /// One group per tag; a multi-tag entry counts toward each of its tags
    PerTag,
}

impl BreakdownMode {
    /// Parse a mode from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "tag_set" | "set" => Some(Self::TagSet),
            "per_tag" | "tag" => Some(Self::PerTag),
            _ => None,
        }
    }
}

impl fmt::Display for BreakdownMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TagSet => write!(f, "tag set"),
            Self::PerTag => write!(f, "per tag"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_does_not_matter() {
        let a = CategorySet::parse_label("Travel, Bills");
        let b = CategorySet::parse_label("Bills, Travel");
        assert_eq!(a, b);
        assert_eq!(a.label(), "Bills, Travel");
    }

    #[test]
    fn test_blank_and_duplicate_tags_dropped() {
        let set = CategorySet::from_tags(["Pay", " ", "Pay ", "Bonus", ""]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.label(), "Bonus, Pay");
    }

    #[test]
    fn test_commas_split_into_tags() {
        let mut set = CategorySet::new();
        assert!(set.insert("Bills,Travel"));
        assert!(!set.insert("Travel"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_empty_set() {
        let set = CategorySet::parse_label("");
        assert!(set.is_empty());
        assert_eq!(set.label(), "");
    }

    #[test]
    fn test_contains() {
        let set: CategorySet = ["Groceries", "Bills"].into_iter().collect();
        assert!(set.contains("Bills"));
        assert!(set.contains(" Groceries "));
        assert!(!set.contains("bills"));
    }

    #[test]
    fn test_entry_kind_parse() {
        assert_eq!(EntryKind::parse("Income"), Some(EntryKind::Income));
        assert_eq!(EntryKind::parse("out"), Some(EntryKind::Expense));
        assert_eq!(EntryKind::parse("transfer"), None);
    }

    #[test]
    fn test_default_tags() {
        assert!(EntryKind::Income.default_tags().contains(&"Pay"));
        assert_eq!(EntryKind::Expense.default_tags().len(), 5);
    }

    #[test]
    fn test_breakdown_mode_parse() {
        assert_eq!(BreakdownMode::parse("per-tag"), Some(BreakdownMode::PerTag));
        assert_eq!(BreakdownMode::parse("tag_set"), Some(BreakdownMode::TagSet));
        assert_eq!(BreakdownMode::parse("bogus"), None);
    }
}
