//! Filter state for one dashboard interaction.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Wildcard journal selection label.
pub const ALL_JOURNALS: &str = "All";

/// Journal selector value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JournalSelection {
    /// No journal restriction.
    #[default]
    All,
    /// Only rows whose journal equals this value.
    Only(String),
}

impl JournalSelection {
    /// Parse a selector label; `"All"` is the wildcard.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        if label == ALL_JOURNALS { Self::All } else { Self::Only(label.to_string()) }
    }

    /// Whether a row's journal passes this selection.
    #[must_use]
    pub fn matches(&self, journal: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => journal == Some(selected.as_str()),
        }
    }

    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl From<String> for JournalSelection {
    fn from(label: String) -> Self {
        if label == ALL_JOURNALS { Self::All } else { Self::Only(label) }
    }
}

impl From<JournalSelection> for String {
    fn from(selection: JournalSelection) -> Self {
        match selection {
            JournalSelection::All => ALL_JOURNALS.to_string(),
            JournalSelection::Only(journal) => journal,
        }
    }
}

/// Year range, journal selection and word-count range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Inclusive publication year range.
    pub years: RangeInclusive<i32>,

    /// Journal selection.
    pub journal: JournalSelection,

    /// Inclusive abstract word-count range.
    pub words: RangeInclusive<usize>,
}

impl FilterState {
    #[must_use]
    pub fn new(
        years: RangeInclusive<i32>,
        journal: JournalSelection,
        words: RangeInclusive<usize>,
    ) -> Self {
        Self { years, journal, words }
    }

    /// A filter that keeps every row with a year in `i32` range and any word count.
    #[must_use]
    pub fn unrestricted() -> Self {
        Self::new(i32::MIN..=i32::MAX, JournalSelection::All, 0..=usize::MAX)
    }
}

/// Partially specified filter, as received from a query string or CLI flags.
///
/// Omitted fields fall back to the dashboard control defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    pub year_lo: Option<i32>,

    #[serde(default)]
    pub year_hi: Option<i32>,

    /// Journal label; `"All"` or omitted means no restriction.
    #[serde(default)]
    pub journal: Option<String>,

    #[serde(default)]
    pub words_lo: Option<usize>,

    #[serde(default)]
    pub words_hi: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_journal_selection_parse() {
        assert_eq!(JournalSelection::parse("All"), JournalSelection::All);
        assert_eq!(JournalSelection::parse("Lancet"), JournalSelection::Only("Lancet".to_string()));
        // Case-sensitive wildcard
        assert_eq!(JournalSelection::parse("all"), JournalSelection::Only("all".to_string()));
    }

    #[test]
    fn test_journal_selection_matches() {
        let only = JournalSelection::parse("Nature");
        assert!(only.matches(Some("Nature")));
        assert!(!only.matches(Some("nature")));
        assert!(!only.matches(None));
        assert!(JournalSelection::All.matches(None));
    }

    #[test]
    fn test_journal_selection_serde() {
        let json = serde_json::to_value(JournalSelection::All).unwrap();
        assert_eq!(json, "All");
        let parsed: JournalSelection = serde_json::from_value(serde_json::json!("Lancet")).unwrap();
        assert_eq!(parsed, JournalSelection::Only("Lancet".to_string()));
    }
}
