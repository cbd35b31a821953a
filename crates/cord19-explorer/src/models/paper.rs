//! Paper record as loaded from CORD-19 metadata.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A research paper row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    /// Paper title.
    pub title: String,

    /// Paper abstract; empty when the source had none.
    #[serde(default)]
    pub r#abstract: String,

    /// Journal name, when the source carries a journal column and the row has a value.
    #[serde(default)]
    pub journal: Option<String>,

    /// Parsed publication date.
    #[serde(default)]
    pub publish_time: Option<NaiveDate>,

    /// Publication year, derived from the date or read from a cleaned source.
    #[serde(default)]
    pub publication_year: Option<i32>,

    /// Number of whitespace-delimited tokens in the abstract.
    #[serde(default)]
    pub abstract_word_count: usize,
}

impl Paper {
    /// Create a paper from a title and abstract; the word count is derived.
    #[must_use]
    pub fn new(title: impl Into<String>, r#abstract: impl Into<String>) -> Self {
        let r#abstract = r#abstract.into();
        Self {
            title: title.into(),
            abstract_word_count: word_count(&r#abstract),
            r#abstract,
            ..Default::default()
        }
    }

    /// Set the journal.
    #[must_use]
    pub fn with_journal(mut self, journal: impl Into<String>) -> Self {
        self.journal = Some(journal.into());
        self
    }

    /// Set the publication date and derive the year from it.
    #[must_use]
    pub fn with_publish_time(mut self, date: NaiveDate) -> Self {
        self.publish_time = Some(date);
        self.publication_year = Some(date.year());
        self
    }

    /// Set the publication year without touching the date.
    #[must_use]
    pub fn with_year(mut self, year: i32) -> Self {
        self.publication_year = Some(year);
        self
    }

    /// Recompute `abstract_word_count` from the abstract text.
    pub fn recount_words(&mut self) {
        self.abstract_word_count = word_count(&self.r#abstract);
    }

    /// Journal name or an empty string.
    #[must_use]
    pub fn journal_or_empty(&self) -> &str {
        self.journal.as_deref().unwrap_or("")
    }
}

/// Count whitespace-delimited tokens.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
